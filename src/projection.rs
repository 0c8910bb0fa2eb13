//! Conversions between the device's internal coordinate representation and
//! geodetic latitude/longitude.
//!
//! Positions are stored as a pair of signed 32-bit "east"/"north" values.
//! East is a linear scaling of longitude by [EAST_SCALE]. North is a
//! Mercator-style northing on the International 1924 ellipsoid, and the
//! latitude it encodes is geocentric, not geodetic, so reading a position
//! takes two steps: [gudermannian] turns the northing into a geocentric
//! latitude, [geocentric_to_geodetic] corrects it to a geodetic one.
//! Writing applies the algebraic inverses in the opposite order.

/// Equatorial axis of the International 1924 ellipsoid, in meters.
const I1924_EQU_AXIS: f64 = 6378388.0;
/// Polar axis of the International 1924 ellipsoid, in meters.
const I1924_POLAR_AXIS: f64 = 6356911.946;

/// cos² of the ellipsoid's angular eccentricity, (polar/equatorial)².
const COS2_AE: f64 = (I1924_POLAR_AXIS * I1924_POLAR_AXIS) / (I1924_EQU_AXIS * I1924_EQU_AXIS);

/// East value of longitude 180°, i.e. the equatorial axis times π.
pub const EAST_SCALE: f64 = 20038297.0;

/// Takes a geodetic latitude in degrees, returns the device's geocentric
/// latitude in degrees.
pub fn geodetic_to_geocentric(gd_lat: f64) -> f64 {
    (COS2_AE * gd_lat.to_radians().tan()).atan().to_degrees()
}

/// Takes a geocentric latitude in degrees, returns the geodetic latitude
/// in degrees. Exact inverse of [geodetic_to_geocentric].
pub fn geocentric_to_geodetic(gc_lat: f64) -> f64 {
    (gc_lat.to_radians().tan() / COS2_AE).atan().to_degrees()
}

/// Takes a projected "north" value, returns a geocentric latitude in
/// degrees.
pub fn gudermannian(north: f64) -> f64 {
    (north / I1924_EQU_AXIS).sinh().atan().to_degrees()
}

/// Takes a geocentric latitude in degrees, returns a projected "north"
/// value. Exact inverse of [gudermannian]; only used when writing.
pub fn inverse_gudermannian(lat: f64) -> f64 {
    let lat_r = lat.to_radians();
    (std::f64::consts::FRAC_PI_4 + lat_r / 2.0).tan().ln() * I1924_EQU_AXIS
}
