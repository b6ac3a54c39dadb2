//! Text serializations of finalized paths and expanded schedules.
//!
//! Every function here builds the whole document in memory and hands it back; writing it
//! to a file or a response body is up to the caller.

use std::{io, string::FromUtf8Error};

use thiserror::Error;

mod delimited;
mod placemark;
mod track;
pub use delimited::*;
pub use placemark::*;
pub use track::*;

pub(crate) const CREATOR: &str = "routesmith";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

fn into_string(bytes: Vec<u8>) -> Result<String, Error> {
    Ok(String::from_utf8(bytes)?)
}

#[test]
fn xml_writer_failures_are_io_errors() {
    let mut writer = quick_xml::Writer::new(FailingSink);
    let err: Error = writer
        .create_element("gpx")
        .write_empty()
        .map(|_| ())
        .unwrap_err()
        .into();
    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.to_string(), "IO error: sink closed");
}

#[cfg(test)]
struct FailingSink;

#[cfg(test)]
impl io::Write for FailingSink {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
