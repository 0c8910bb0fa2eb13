//! Decoder/Encoder for Humminbird waypoint, route and track files.
//!
//! Humminbird fishfinders and chartplotters store waypoints and routes in
//! `.hwr` files and tracks in `.ht` files. Both share a record scheme: a
//! 4-byte signature selects the record type, followed by a fixed-size
//! big-endian structure. Positions are stored in the device's internal
//! projection (geocentric latitude, Mercator-style northing on the
//! International 1924 ellipsoid); the [projection] module converts between
//! that representation and geodetic latitude/longitude.
//!
//! Use [decode_file] to read either file kind into a [File], and
//! [encode_waypoint_file] / [encode_track_file] (or a [Writer]) to produce
//! device-compatible files again.

mod consts;
mod decode;
mod encode;
pub mod projection;
pub mod shortname;

pub use decode::*;
pub use encode::*;

/// A single point, either standalone, a route member or a track sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Waypoint {
    pub name: String,
    /// Geodetic latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Always zero when decoded; the devices record no elevation.
    pub altitude: f64,
    /// Water depth in meters, if the sounder recorded one.
    pub depth: Option<f64>,
    /// Creation time as POSIX seconds, UTC.
    pub time: Option<u32>,
    /// Icon description, e.g. "Anchor".
    pub icon: Option<String>,
}

/// An ordered list of waypoints. Routes own independent copies of their
/// points; sharing with the standalone waypoint list is re-established
/// through identity when encoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    pub name: String,
    pub points: Vec<Waypoint>,
}

/// A recorded track. Point positions are delta-compressed on the wire and
/// materialized as absolute coordinates here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    pub number: u16,
    pub name: String,
    pub points: Vec<Waypoint>,
}

/// The in-memory counterpart of one device file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct File {
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<Route>,
    pub tracks: Vec<Track>,
}
