use std::collections::HashMap;

use crate::consts::*;
use crate::projection::{EAST_SCALE, geocentric_to_geodetic, gudermannian};
use crate::{File, Route, Track, Waypoint};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("unexpected end of file")]
    UnexpectedEof,
    #[error("invalid record signature {0:#010x} (no or unknown humminbird file)")]
    InvalidSignature(u32),
    #[error("too many track points ({0})")]
    TooManyTrackPoints(u16),
}

/// Waypoint status byte. Group bookkeeping entries reuse the waypoint
/// record layout; only the three "real point" statuses produce output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaypointStatus {
    Unused,
    Permanent,
    Temporary,
    ManOverboard,
    GroupHeader,
    GroupBody,
    GroupInvalid,
    Unknown(u8),
}

impl WaypointStatus {
    fn from_byte(byte: u8) -> Self {
        match byte {
            0 => Self::Unused,
            1 => Self::Permanent,
            2 => Self::Temporary,
            3 => Self::ManOverboard,
            16 => Self::GroupHeader,
            17 => Self::GroupBody,
            63 => Self::GroupInvalid,
            other => Self::Unknown(other),
        }
    }

    fn is_point(self) -> bool {
        matches!(self, Self::Permanent | Self::Temporary | Self::ManOverboard)
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct TrackDelta {
    east: i16,
    north: i16,
    depth: u16,
}

/// Decode a `.hwr` or `.ht` file.
///
/// Records are processed in file order; routes resolve their members
/// against the waypoint records read earlier in the same file. A track
/// record ends the pass, whatever follows it is padding.
pub fn decode_file(data: &[u8]) -> Result<File, DecodeError> {
    let mut file = File::default();
    let mut wpt_by_num: HashMap<u16, Waypoint> = HashMap::new();
    let mut pos = 0;

    while pos < data.len() {
        let signature = u32::from_be_bytes(take(data, &mut pos, 4)?.try_into().unwrap());
        match signature {
            WPT_MAGIC | WPT_MAGIC2 => {
                let record = take(data, &mut pos, WPT_RECORD_SIZE)?;
                decode_waypoint(record, &mut wpt_by_num, &mut file);
            }
            RTE_MAGIC => {
                let record = take(data, &mut pos, RTE_RECORD_SIZE)?;
                decode_route(record, &wpt_by_num, &mut file);
            }
            TRK_MAGIC => {
                decode_track(data, &mut pos, &mut file)?;
                break;
            }
            TRK_MAGIC_OLD => {
                decode_track_old(data, &mut pos, &mut file)?;
                break;
            }
            signature => return Err(DecodeError::InvalidSignature(signature)),
        }
    }

    Ok(file)
}

fn decode_waypoint(record: &[u8], wpt_by_num: &mut HashMap<u16, Waypoint>, file: &mut File) {
    let num = read_u16(record, WPT_NUM_OFFSET);
    let status = WaypointStatus::from_byte(record[WPT_STATUS_OFFSET]);
    let icon = record[WPT_ICON_OFFSET];
    let depth = read_u16(record, WPT_DEPTH_OFFSET);
    let time = read_u32(record, WPT_TIME_OFFSET);
    let east = read_i32(record, WPT_EAST_OFFSET);
    let north = read_i32(record, WPT_NORTH_OFFSET);

    if !status.is_point() {
        return;
    }

    let wpt = Waypoint {
        name: read_name(record, WPT_NAME_OFFSET, WPT_NAME_LEN),
        latitude: geocentric_to_geodetic(gudermannian(f64::from(north))),
        longitude: f64::from(east) / EAST_SCALE * 180.0,
        altitude: 0.0, // it's from a fishfinder
        depth: (depth != 0).then(|| f64::from(depth) / 100.0),
        time: Some(time),
        icon: ICONS.get(usize::from(icon)).map(|name| name.to_string()),
    };

    // register the point under its device-internal number, routes later in
    // the file refer to it that way
    wpt_by_num.insert(num, wpt.clone());
    file.waypoints.push(wpt);
}

fn decode_route(record: &[u8], wpt_by_num: &HashMap<u16, Waypoint>, file: &mut File) {
    let count = record[RTE_COUNT_OFFSET] as i8;
    if count <= 0 {
        return;
    }
    let count = (count as usize).min(MAX_RTE_POINTS);

    let mut route: Option<Route> = None;
    for i in 0..count {
        let num = read_u16(record, RTE_POINTS_OFFSET + i * 2);
        // references that don't resolve are skipped; the waypoint was
        // dropped (group entry) or the file is out of order
        if let Some(wpt) = wpt_by_num.get(&num) {
            let route = route.get_or_insert_with(|| Route {
                name: read_name(record, RTE_NAME_OFFSET, RTE_NAME_LEN),
                points: Vec::new(),
            });
            route.points.push(wpt.clone());
        }
    }

    if let Some(route) = route {
        file.routes.push(route);
    }
}

fn decode_track(data: &[u8], pos: &mut usize, file: &mut File) -> Result<(), DecodeError> {
    let header = take(data, pos, TRK_HEADER_SIZE)?;
    let trk_num = read_u16(header, TRK_NUM_OFFSET);
    let mut num_points = read_u16(header, TRK_COUNT_OFFSET);
    let time = read_u32(header, TRK_TIME_OFFSET);
    let start_east = read_i32(header, TRK_START_EAST_OFFSET);
    let start_north = read_i32(header, TRK_START_NORTH_OFFSET);

    // full tracks store capacity+1
    if usize::from(num_points) == TRK_MAX_POINTS + 1 {
        num_points -= 1;
    }
    if usize::from(num_points) > TRK_MAX_POINTS {
        return Err(DecodeError::TooManyTrackPoints(num_points));
    }

    // num_points includes the implicit first point in the header, so there
    // is one delta record less. An extra zeroed slot is appended because
    // the freak-value filter rewrites the point after the current one.
    let delta_count = usize::from(num_points).saturating_sub(1);
    let raw = take(data, pos, delta_count * TRK_POINT_SIZE)?;

    let mut deltas: Vec<TrackDelta> = Vec::with_capacity(delta_count + 1);
    for chunk in raw.chunks_exact(TRK_POINT_SIZE) {
        deltas.push(TrackDelta {
            east: i16::from_be_bytes(chunk[0..2].try_into().unwrap()),
            north: i16::from_be_bytes(chunk[2..4].try_into().unwrap()),
            depth: u16::from_be_bytes(chunk[4..6].try_into().unwrap()),
        });
    }
    deltas.push(TrackDelta::default());
    filter_freak_values(&mut deltas);

    let mut track = Track {
        number: trk_num,
        name: read_name(header, TRK_NAME_OFFSET, TRK_NAME_LEN),
        points: Vec::with_capacity(delta_count + 1),
    };

    let mut accum_east = start_east;
    let mut accum_north = start_north;
    // one point for the info in the header; it carries no depth
    track.points.push(track_point(accum_east, accum_north, None, None));

    for (i, delta) in deltas[..delta_count].iter().enumerate() {
        accum_east = accum_east.wrapping_add(i32::from(delta.east));
        accum_north = accum_north.wrapping_add(i32::from(delta.north));
        let depth = (delta.depth != 0).then(|| f64::from(delta.depth) / 100.0);
        // the last point gets the date from the header, unless that is
        // zero (happens when the unit had no fix when the track was saved)
        let time = (i == delta_count - 1 && time != 0).then_some(time);
        track
            .points
            .push(track_point(accum_east, accum_north, depth, time));
    }

    file.tracks.push(track);
    Ok(())
}

fn decode_track_old(data: &[u8], pos: &mut usize, file: &mut File) -> Result<(), DecodeError> {
    let header = take(data, pos, TRK_OLD_HEADER_SIZE)?;
    let trk_num = read_u16(header, TRK_NUM_OFFSET);
    let num_points = read_u16(header, TRK_COUNT_OFFSET);
    let time = read_u32(header, TRK_TIME_OFFSET);
    let start_east = read_i32(header, TRK_START_EAST_OFFSET);
    let start_north = read_i32(header, TRK_START_NORTH_OFFSET);

    if usize::from(num_points) > TRK_OLD_MAX_POINTS {
        return Err(DecodeError::TooManyTrackPoints(num_points));
    }

    let delta_count = usize::from(num_points).saturating_sub(1);
    let raw = take(data, pos, delta_count * TRK_OLD_POINT_SIZE)?;

    // the name is not in the header but in the last 20 bytes of the file
    if data.len() < TRK_OLD_FILE_SIZE {
        return Err(DecodeError::UnexpectedEof);
    }
    let mut track = Track {
        number: trk_num,
        name: read_name(data, TRK_OLD_NAME_OFFSET, TRK_NAME_LEN),
        points: Vec::with_capacity(delta_count + 1),
    };

    let mut accum_east = start_east;
    let mut accum_north = start_north;
    track.points.push(track_point(accum_east, accum_north, None, None));

    // no freak-value filter and no depth in this format
    for (i, chunk) in raw.chunks_exact(TRK_OLD_POINT_SIZE).enumerate() {
        let delta_east = i16::from_be_bytes(chunk[0..2].try_into().unwrap());
        let delta_north = i16::from_be_bytes(chunk[2..4].try_into().unwrap());
        accum_east = accum_east.wrapping_add(i32::from(delta_east));
        accum_north = accum_north.wrapping_add(i32::from(delta_north));
        let time = (i == delta_count - 1 && time != 0).then_some(time);
        track
            .points
            .push(track_point(accum_east, accum_north, None, time));
    }

    file.tracks.push(track);
    Ok(())
}

/// Every once in a while a delta is stored as 32767 with -32768 following
/// in the next point. That pair encodes a small step backwards, not a
/// 65535-unit jump.
fn filter_freak_values(deltas: &mut [TrackDelta]) {
    for i in 0..deltas.len() - 1 {
        if deltas[i].east == i16::MAX && deltas[i + 1].east == i16::MIN {
            deltas[i].east = -1;
            deltas[i + 1].east = 0;
        }
        if deltas[i].north == i16::MAX && deltas[i + 1].north == i16::MIN {
            deltas[i].north = -1;
            deltas[i + 1].north = 0;
        }
    }
}

fn track_point(east: i32, north: i32, depth: Option<f64>, time: Option<u32>) -> Waypoint {
    Waypoint {
        latitude: geocentric_to_geodetic(gudermannian(f64::from(north))),
        longitude: f64::from(east) / EAST_SCALE * 180.0,
        depth,
        time,
        ..Waypoint::default()
    }
}

fn take<'a>(data: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8], DecodeError> {
    if len > data.len() - *pos {
        return Err(DecodeError::UnexpectedEof);
    }
    let slice = &data[*pos..*pos + len];
    *pos += len;
    Ok(slice)
}

fn read_u16(record: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes(record[offset..offset + 2].try_into().unwrap())
}

fn read_u32(record: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(record[offset..offset + 4].try_into().unwrap())
}

fn read_i32(record: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes(record[offset..offset + 4].try_into().unwrap())
}

fn read_name(record: &[u8], offset: usize, len: usize) -> String {
    let field = &record[offset..offset + len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_debug_snapshot;

    fn make_waypoint_record(
        num: u16,
        status: u8,
        icon: u8,
        depth: u16,
        time: u32,
        east: i32,
        north: i32,
        name: &[u8],
    ) -> Vec<u8> {
        let mut record = [0u8; WPT_RECORD_SIZE];
        record[WPT_NUM_OFFSET..WPT_NUM_OFFSET + 2].copy_from_slice(&num.to_be_bytes());
        record[WPT_STATUS_OFFSET] = status;
        record[WPT_ICON_OFFSET] = icon;
        record[WPT_DEPTH_OFFSET..WPT_DEPTH_OFFSET + 2].copy_from_slice(&depth.to_be_bytes());
        record[WPT_TIME_OFFSET..WPT_TIME_OFFSET + 4].copy_from_slice(&time.to_be_bytes());
        record[WPT_EAST_OFFSET..WPT_EAST_OFFSET + 4].copy_from_slice(&east.to_be_bytes());
        record[WPT_NORTH_OFFSET..WPT_NORTH_OFFSET + 4].copy_from_slice(&north.to_be_bytes());
        record[WPT_NAME_OFFSET..WPT_NAME_OFFSET + name.len()].copy_from_slice(name);

        let mut data = WPT_MAGIC.to_be_bytes().to_vec();
        data.extend_from_slice(&record);
        data
    }

    fn make_route_record(num: u16, count: i8, name: &[u8], points: &[u16]) -> Vec<u8> {
        let mut record = [0u8; RTE_RECORD_SIZE];
        record[RTE_NUM_OFFSET..RTE_NUM_OFFSET + 2].copy_from_slice(&num.to_be_bytes());
        record[RTE_COUNT_OFFSET] = count as u8;
        record[RTE_NAME_OFFSET..RTE_NAME_OFFSET + name.len()].copy_from_slice(name);
        for (i, point) in points.iter().enumerate() {
            let offset = RTE_POINTS_OFFSET + i * 2;
            record[offset..offset + 2].copy_from_slice(&point.to_be_bytes());
        }

        let mut data = RTE_MAGIC.to_be_bytes().to_vec();
        data.extend_from_slice(&record);
        data
    }

    fn make_track_file(
        num_points: u16,
        time: u32,
        start_east: i32,
        start_north: i32,
        name: &[u8],
        deltas: &[(i16, i16, u16)],
    ) -> Vec<u8> {
        let mut data = TRK_MAGIC.to_be_bytes().to_vec();
        let mut header = [0u8; TRK_HEADER_SIZE];
        header[TRK_COUNT_OFFSET..TRK_COUNT_OFFSET + 2].copy_from_slice(&num_points.to_be_bytes());
        header[TRK_TIME_OFFSET..TRK_TIME_OFFSET + 4].copy_from_slice(&time.to_be_bytes());
        header[TRK_START_EAST_OFFSET..TRK_START_EAST_OFFSET + 4]
            .copy_from_slice(&start_east.to_be_bytes());
        header[TRK_START_NORTH_OFFSET..TRK_START_NORTH_OFFSET + 4]
            .copy_from_slice(&start_north.to_be_bytes());
        header[TRK_NAME_OFFSET..TRK_NAME_OFFSET + name.len()].copy_from_slice(name);
        data.extend_from_slice(&header);
        for (east, north, depth) in deltas {
            data.extend_from_slice(&east.to_be_bytes());
            data.extend_from_slice(&north.to_be_bytes());
            data.extend_from_slice(&depth.to_be_bytes());
        }
        data
    }

    #[test]
    fn decoding_an_empty_file_yields_nothing() {
        let file = decode_file(b"").unwrap();
        assert_eq!(file, File::default());
    }

    #[test]
    fn decoding_fails_for_truncated_signature() {
        assert_debug_snapshot!(decode_file(&[0x02, 0x02]).unwrap_err(), @"UnexpectedEof");
    }

    #[test]
    fn decoding_fails_for_unknown_signature() {
        let data = 0xdeadbeefu32.to_be_bytes();
        assert_debug_snapshot!(decode_file(&data).unwrap_err(), @r###"
        InvalidSignature(
            3735928559,
        )
        "###);
    }

    #[test]
    fn decoding_fails_for_truncated_waypoint_record() {
        let mut data = make_waypoint_record(0, 1, 0, 0, 0, 0, 0, b"CUT");
        data.truncate(20);
        assert_debug_snapshot!(decode_file(&data).unwrap_err(), @"UnexpectedEof");
    }

    #[test]
    fn decoding_a_waypoint_converts_position_and_depth() {
        let data = make_waypoint_record(7, 1, 5, 370, 1216600000, 1624000, 6503000, b"Reef");
        let file = decode_file(&data).unwrap();

        assert_eq!(file.waypoints.len(), 1);
        let wpt = &file.waypoints[0];
        assert_eq!(wpt.name, "Reef");
        assert_eq!(wpt.icon.as_deref(), Some("Anchor"));
        assert_eq!(wpt.depth, Some(3.7));
        assert_eq!(wpt.time, Some(1216600000));
        assert!((wpt.longitude - f64::from(1624000) / EAST_SCALE * 180.0).abs() < 1e-12);
        let expected_lat = geocentric_to_geodetic(gudermannian(6503000.0));
        assert!((wpt.latitude - expected_lat).abs() < 1e-12);
    }

    #[test]
    fn zero_depth_means_no_depth() {
        let data = make_waypoint_record(0, 1, 0, 0, 0, 0, 0, b"Dry");
        let file = decode_file(&data).unwrap();
        assert_eq!(file.waypoints[0].depth, None);
    }

    #[test]
    fn icon_indices_outside_the_table_decode_to_no_icon() {
        let data = make_waypoint_record(0, 1, 200, 0, 0, 0, 0, b"X");
        let file = decode_file(&data).unwrap();
        assert_eq!(file.waypoints[0].icon, None);
    }

    #[test]
    fn non_point_statuses_are_dropped() {
        let mut data = Vec::new();
        for (num, status) in [(0u16, 0u8), (1, 1), (2, 2), (3, 3), (4, 16), (5, 17), (6, 63)] {
            data.extend(make_waypoint_record(num, status, 0, 0, 0, 0, 0, b"S"));
        }
        let file = decode_file(&data).unwrap();
        assert_eq!(file.waypoints.len(), 3);
    }

    #[test]
    fn the_newer_waypoint_signature_is_accepted() {
        let mut data = make_waypoint_record(0, 1, 0, 0, 0, 0, 0, b"W");
        data[0..4].copy_from_slice(&WPT_MAGIC2.to_be_bytes());
        let file = decode_file(&data).unwrap();
        assert_eq!(file.waypoints.len(), 1);
    }

    #[test]
    fn routes_resolve_points_read_earlier() {
        let mut data = Vec::new();
        data.extend(make_waypoint_record(10, 1, 0, 0, 0, 1000, 2000, b"A"));
        data.extend(make_waypoint_record(11, 1, 0, 0, 0, 3000, 4000, b"B"));
        data.extend(make_route_record(0, 3, b"Morning run", &[11, 999, 10]));

        let file = decode_file(&data).unwrap();
        assert_eq!(file.routes.len(), 1);
        let route = &file.routes[0];
        assert_eq!(route.name, "Morning run");
        // the unresolvable reference (999) is skipped
        assert_eq!(route.points.len(), 2);
        assert_eq!(route.points[0].name, "B");
        assert_eq!(route.points[1].name, "A");
        // route points are copies, the standalone list is unaffected
        assert_eq!(file.waypoints.len(), 2);
    }

    #[test]
    fn a_route_with_no_resolvable_points_is_omitted() {
        let data = make_route_record(0, 2, b"Ghost", &[1, 2]);
        let file = decode_file(&data).unwrap();
        assert!(file.routes.is_empty());
    }

    #[test]
    fn a_route_with_nonpositive_count_is_omitted() {
        let mut data = Vec::new();
        data.extend(make_waypoint_record(1, 1, 0, 0, 0, 0, 0, b"A"));
        data.extend(make_route_record(0, 0, b"Empty", &[]));
        data.extend(make_route_record(1, -3, b"Negative", &[1]));
        let file = decode_file(&data).unwrap();
        assert!(file.routes.is_empty());
    }

    #[test]
    fn track_points_accumulate_deltas() {
        let data = make_track_file(
            4,
            1216600000,
            100000,
            200000,
            b"Drift",
            &[(10, -20, 0), (-5, 15, 250), (1, 1, 0)],
        );
        let file = decode_file(&data).unwrap();

        assert_eq!(file.tracks.len(), 1);
        let track = &file.tracks[0];
        assert_eq!(track.name, "Drift");
        assert_eq!(track.points.len(), 4);

        let expected = [
            (100000, 200000),
            (100010, 199980),
            (100005, 199995),
            (100006, 199996),
        ];
        for (point, (east, north)) in track.points.iter().zip(expected) {
            assert!((point.longitude - f64::from(east) / EAST_SCALE * 180.0).abs() < 1e-12);
            let lat = geocentric_to_geodetic(gudermannian(f64::from(north)));
            assert!((point.latitude - lat).abs() < 1e-12);
        }

        assert_eq!(track.points[2].depth, Some(2.5));
        assert_eq!(track.points[1].depth, None);

        // only the last point carries the header time
        assert_eq!(track.points[3].time, Some(1216600000));
        assert_eq!(track.points[2].time, None);
    }

    #[test]
    fn a_zero_header_time_reaches_no_point() {
        let data = make_track_file(2, 0, 0, 0, b"Untimed", &[(1, 1, 0)]);
        let file = decode_file(&data).unwrap();
        assert_eq!(file.tracks[0].points[1].time, None);
    }

    #[test]
    fn freak_value_pairs_decode_as_small_steps() {
        let data = make_track_file(
            3,
            0,
            100000,
            200000,
            b"Freak",
            &[(i16::MAX, 4, 0), (i16::MIN, 6, 0)],
        );
        let file = decode_file(&data).unwrap();
        let track = &file.tracks[0];

        // east deltas are rewritten to -1 and 0, north is untouched
        let expected = [(100000, 200000), (99999, 200004), (99999, 200010)];
        for (point, (east, north)) in track.points.iter().zip(expected) {
            assert!((point.longitude - f64::from(east) / EAST_SCALE * 180.0).abs() < 1e-12);
            let lat = geocentric_to_geodetic(gudermannian(f64::from(north)));
            assert!((point.latitude - lat).abs() < 1e-12);
        }
    }

    #[test]
    fn a_track_ends_the_pass() {
        let mut data = make_track_file(2, 0, 0, 0, b"Last", &[(1, 1, 0)]);
        // trailing padding and even valid-looking records must not be read
        data.extend_from_slice(&[0u8; 64]);
        data.extend(make_waypoint_record(0, 1, 0, 0, 0, 0, 0, b"After"));

        let file = decode_file(&data).unwrap();
        assert_eq!(file.tracks.len(), 1);
        assert!(file.waypoints.is_empty());
    }

    #[test]
    fn a_point_count_of_capacity_plus_one_is_tolerated() {
        let num_points = (TRK_MAX_POINTS + 1) as u16;
        let deltas = vec![(0i16, 0i16, 0u16); TRK_MAX_POINTS - 1];
        let data = make_track_file(num_points, 0, 0, 0, b"Full", &deltas);
        let file = decode_file(&data).unwrap();
        assert_eq!(file.tracks[0].points.len(), TRK_MAX_POINTS);
    }

    #[test]
    fn a_point_count_above_capacity_plus_one_is_fatal() {
        let num_points = (TRK_MAX_POINTS + 2) as u16;
        let data = make_track_file(num_points, 0, 0, 0, b"Overflow", &[]);
        assert_debug_snapshot!(decode_file(&data).unwrap_err(), @r###"
        TooManyTrackPoints(
            21837,
        )
        "###);
    }

    #[test]
    fn old_format_tracks_read_their_name_from_the_file_end() {
        let mut data = TRK_MAGIC_OLD.to_be_bytes().to_vec();
        let mut header = [0u8; TRK_OLD_HEADER_SIZE];
        header[TRK_COUNT_OFFSET..TRK_COUNT_OFFSET + 2].copy_from_slice(&3u16.to_be_bytes());
        header[TRK_TIME_OFFSET..TRK_TIME_OFFSET + 4].copy_from_slice(&77u32.to_be_bytes());
        header[TRK_START_EAST_OFFSET..TRK_START_EAST_OFFSET + 4]
            .copy_from_slice(&500i32.to_be_bytes());
        header[TRK_START_NORTH_OFFSET..TRK_START_NORTH_OFFSET + 4]
            .copy_from_slice(&600i32.to_be_bytes());
        data.extend_from_slice(&header);
        for (east, north) in [(10i16, 20i16), (-10, -20)] {
            data.extend_from_slice(&east.to_be_bytes());
            data.extend_from_slice(&north.to_be_bytes());
        }
        // files of this format are always 8048 bytes, the last 20 hold the name
        data.resize(TRK_OLD_NAME_OFFSET, 0);
        let mut name = [0u8; TRK_NAME_LEN];
        name[..7].copy_from_slice(b"Old one");
        data.extend_from_slice(&name);
        assert_eq!(data.len(), TRK_OLD_FILE_SIZE);

        let file = decode_file(&data).unwrap();
        let track = &file.tracks[0];
        assert_eq!(track.name, "Old one");
        assert_eq!(track.points.len(), 3);
        // no depth in this format
        assert!(track.points.iter().all(|point| point.depth.is_none()));
        assert_eq!(track.points[2].time, Some(77));

        let expected = [(500, 600), (510, 620), (500, 600)];
        for (point, (east, north)) in track.points.iter().zip(expected) {
            assert!((point.longitude - f64::from(east) / EAST_SCALE * 180.0).abs() < 1e-12);
        }
    }

    #[test]
    fn old_format_tracks_are_bounded_by_their_fixed_file_size() {
        let mut data = TRK_MAGIC_OLD.to_be_bytes().to_vec();
        let mut header = [0u8; TRK_OLD_HEADER_SIZE];
        let num_points = (TRK_OLD_MAX_POINTS + 1) as u16;
        header[TRK_COUNT_OFFSET..TRK_COUNT_OFFSET + 2].copy_from_slice(&num_points.to_be_bytes());
        data.extend_from_slice(&header);
        assert_debug_snapshot!(decode_file(&data).unwrap_err(), @r###"
        TooManyTrackPoints(
            2000,
        )
        "###);
    }
}
