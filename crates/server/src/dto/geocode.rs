use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeRequest {
    pub addresses: Vec<String>,
}
