mod export;
mod geocode;
mod timetable;
pub use export::*;
pub use geocode::*;
pub use timetable::*;
