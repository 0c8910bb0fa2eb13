use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::consts::*;
use crate::projection::{EAST_SCALE, geodetic_to_geocentric, inverse_gudermannian};
use crate::shortname::ShortName;
use crate::{File, Route, Track, Waypoint};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncodeError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("routes are limited to 50 points, simplify the route first")]
    TooManyRoutePoints,
    #[error("too many track points for a single track record")]
    TooManyTrackPoints,
}

/// Encode the waypoints and routes of `file` as a `.hwr` byte stream.
pub fn encode_waypoint_file(file: &File) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_waypoints(file)?;
    Ok(writer.into_inner().into_inner())
}

/// Encode the tracks of `file` as a `.ht` byte stream.
pub fn encode_track_file(file: &File) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_tracks(file)?;
    Ok(writer.into_inner().into_inner())
}

pub struct Writer<W: Write> {
    writer: W,
    waypoint_num: u16,
    route_num: u16,
    /// identity of every waypoint written so far, mapped to its assigned
    /// output number
    wpt_num_by_id: HashMap<String, u16>,
    /// route records are stamped with the time the file was produced
    session_time: u32,
    wpt_names: ShortName,
    rte_names: ShortName,
    trk_names: ShortName,
}

impl<W: Write> Writer<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: inner,
            waypoint_num: 0,
            route_num: 0,
            wpt_num_by_id: HashMap::new(),
            session_time: unix_now(),
            wpt_names: ShortName::new(WPT_NAME_LEN - 1)
                .badchars(BAD_CHARS)
                .default_name("WPT"),
            rte_names: ShortName::new(RTE_NAME_LEN - 1)
                .badchars(BAD_CHARS)
                .default_name("Route"),
            trk_names: ShortName::new(TRK_NAME_LEN - 1)
                .badchars(BAD_CHARS)
                .default_name("Track"),
        }
    }

    /// Write the waypoint and route records (the `.hwr` file layout).
    ///
    /// All waypoint records come first: the standalone list, then route
    /// members not already covered by it. A waypoint appearing both
    /// standalone and in routes is written once, and every route record
    /// references it by the single number it was assigned.
    pub fn write_waypoints(&mut self, file: &File) -> Result<(), EncodeError> {
        for wpt in &file.waypoints {
            self.write_waypoint_once(wpt)?;
        }
        for route in &file.routes {
            for wpt in &route.points {
                self.write_waypoint_once(wpt)?;
            }
        }
        for route in &file.routes {
            self.write_route(route)?;
        }
        Ok(())
    }

    /// Write the track records (the `.ht` file layout). Tracks without
    /// points produce no record.
    pub fn write_tracks(&mut self, file: &File) -> Result<(), EncodeError> {
        for track in &file.tracks {
            self.write_track(track)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_waypoint_once(&mut self, wpt: &Waypoint) -> Result<(), EncodeError> {
        let id = waypoint_id(wpt);
        if self.wpt_num_by_id.contains_key(&id) {
            return Ok(());
        }
        self.wpt_num_by_id.insert(id, self.waypoint_num);
        self.write_waypoint(wpt)
    }

    fn write_waypoint(&mut self, wpt: &Waypoint) -> Result<(), EncodeError> {
        let mut record = [0u8; WPT_RECORD_SIZE];
        record[WPT_NUM_OFFSET..WPT_NUM_OFFSET + 2]
            .copy_from_slice(&self.waypoint_num.to_be_bytes());
        self.waypoint_num = self.waypoint_num.wrapping_add(1);

        record[WPT_STATUS_OFFSET] = 1; // permanent
        record[WPT_ICON_OFFSET] = match &wpt.icon {
            Some(descr) => icon_index(descr),
            None => NO_ICON,
        };

        let depth = (wpt.depth.unwrap_or(0.0) * 100.0).round() as u16;
        record[WPT_DEPTH_OFFSET..WPT_DEPTH_OFFSET + 2].copy_from_slice(&depth.to_be_bytes());
        record[WPT_TIME_OFFSET..WPT_TIME_OFFSET + 4]
            .copy_from_slice(&wpt.time.unwrap_or(0).to_be_bytes());

        let (east, north) = project(wpt);
        record[WPT_EAST_OFFSET..WPT_EAST_OFFSET + 4].copy_from_slice(&east.to_be_bytes());
        record[WPT_NORTH_OFFSET..WPT_NORTH_OFFSET + 4].copy_from_slice(&north.to_be_bytes());

        let name = self.wpt_names.shorten(&wpt.name);
        write_name(&mut record, WPT_NAME_OFFSET, WPT_NAME_LEN, &name);

        self.writer.write_all(&WPT_MAGIC.to_be_bytes())?;
        self.writer.write_all(&record)?;
        Ok(())
    }

    fn write_route(&mut self, route: &Route) -> Result<(), EncodeError> {
        if route.points.is_empty() {
            return Ok(());
        }

        let mut numbers: Vec<u16> = Vec::new();
        for wpt in &route.points {
            match self.wpt_num_by_id.get(&waypoint_id(wpt)) {
                Some(&num) => {
                    if numbers.len() >= MAX_RTE_POINTS {
                        return Err(EncodeError::TooManyRoutePoints);
                    }
                    numbers.push(num);
                }
                None => {
                    // should not occur, write_waypoints registers every
                    // route member before the route records are emitted
                    log::warn!(
                        "missing waypoint reference in route {:?}, point dropped",
                        route.name
                    );
                }
            }
        }
        if numbers.is_empty() {
            return Ok(());
        }

        let mut record = [0u8; RTE_RECORD_SIZE];
        record[RTE_NUM_OFFSET..RTE_NUM_OFFSET + 2].copy_from_slice(&self.route_num.to_be_bytes());
        self.route_num = self.route_num.wrapping_add(1);
        record[RTE_COUNT_OFFSET] = numbers.len() as u8;
        record[RTE_TIME_OFFSET..RTE_TIME_OFFSET + 4]
            .copy_from_slice(&self.session_time.to_be_bytes());
        let name = self.rte_names.shorten(&route.name);
        write_name(&mut record, RTE_NAME_OFFSET, RTE_NAME_LEN, &name);
        for (i, num) in numbers.iter().enumerate() {
            let offset = RTE_POINTS_OFFSET + i * 2;
            record[offset..offset + 2].copy_from_slice(&num.to_be_bytes());
        }

        self.writer.write_all(&RTE_MAGIC.to_be_bytes())?;
        self.writer.write_all(&record)?;
        Ok(())
    }

    fn write_track(&mut self, track: &Track) -> Result<(), EncodeError> {
        if track.points.is_empty() {
            return Ok(());
        }
        if track.points.len() > TRK_MAX_POINTS {
            return Err(EncodeError::TooManyTrackPoints);
        }

        let mut header = [0u8; TRK_HEADER_SIZE];
        // deltas go into the full fixed-capacity buffer, unused slots stay
        // zero; the on-disk record size never varies
        let mut points = vec![0u8; TRK_MAX_POINTS * TRK_POINT_SIZE];

        header[TRK_NUM_OFFSET..TRK_NUM_OFFSET + 2].copy_from_slice(&track.number.to_be_bytes());
        let name = self.trk_names.shorten(&track.name);
        write_name(&mut header, TRK_NAME_OFFSET, TRK_NAME_LEN, &name);

        let mut last_east = 0i32;
        let mut last_north = 0i32;
        let mut last_time = 0u32;
        let (mut sw_east, mut sw_north) = (0i32, 0i32);
        let (mut ne_east, mut ne_north) = (0i32, 0i32);

        for (i, wpt) in track.points.iter().enumerate() {
            let (east, north) = project(wpt);

            if let Some(time) = wpt.time {
                last_time = time;
            }

            if i == 0 {
                // the first point lives in the header and seeds the
                // bounding box
                header[TRK_START_EAST_OFFSET..TRK_START_EAST_OFFSET + 4]
                    .copy_from_slice(&east.to_be_bytes());
                header[TRK_START_NORTH_OFFSET..TRK_START_NORTH_OFFSET + 4]
                    .copy_from_slice(&north.to_be_bytes());
                (sw_east, ne_east) = (east, east);
                (sw_north, ne_north) = (north, north);
            } else {
                let delta_east = east.wrapping_sub(last_east) as i16;
                let delta_north = north.wrapping_sub(last_north) as i16;
                let depth = (wpt.depth.unwrap_or(0.0) * 100.0).round() as u16;
                let slot = &mut points[(i - 1) * TRK_POINT_SIZE..i * TRK_POINT_SIZE];
                slot[0..2].copy_from_slice(&delta_east.to_be_bytes());
                slot[2..4].copy_from_slice(&delta_north.to_be_bytes());
                slot[4..6].copy_from_slice(&depth.to_be_bytes());

                sw_east = sw_east.min(east);
                ne_east = ne_east.max(east);
                sw_north = sw_north.min(north);
                ne_north = ne_north.max(north);
            }

            last_east = east;
            last_north = north;
        }

        let num_points = track.points.len() as u16;
        header[TRK_COUNT_OFFSET..TRK_COUNT_OFFSET + 2].copy_from_slice(&num_points.to_be_bytes());
        header[TRK_TIME_OFFSET..TRK_TIME_OFFSET + 4].copy_from_slice(&last_time.to_be_bytes());
        header[TRK_END_EAST_OFFSET..TRK_END_EAST_OFFSET + 4]
            .copy_from_slice(&last_east.to_be_bytes());
        header[TRK_END_NORTH_OFFSET..TRK_END_NORTH_OFFSET + 4]
            .copy_from_slice(&last_north.to_be_bytes());
        header[TRK_SW_EAST_OFFSET..TRK_SW_EAST_OFFSET + 4].copy_from_slice(&sw_east.to_be_bytes());
        header[TRK_SW_NORTH_OFFSET..TRK_SW_NORTH_OFFSET + 4]
            .copy_from_slice(&sw_north.to_be_bytes());
        header[TRK_NE_EAST_OFFSET..TRK_NE_EAST_OFFSET + 4].copy_from_slice(&ne_east.to_be_bytes());
        header[TRK_NE_NORTH_OFFSET..TRK_NE_NORTH_OFFSET + 4]
            .copy_from_slice(&ne_north.to_be_bytes());

        self.writer.write_all(&TRK_MAGIC.to_be_bytes())?;
        self.writer.write_all(&header)?;
        self.writer.write_all(&points)?;
        // the fixed record length doesn't hold a whole number of entries
        self.writer.write_all(&0u16.to_be_bytes())?;
        Ok(())
    }
}

/// Two in-memory waypoints denote the same physical point when name and
/// position agree. Used to write shared waypoints exactly once.
fn waypoint_id(wpt: &Waypoint) -> String {
    format!(
        "{}\x01{:.9}\x01{:.9}",
        wpt.name, wpt.latitude, wpt.longitude
    )
}

fn project(wpt: &Waypoint) -> (i32, i32) {
    let east = wpt.longitude / 180.0 * EAST_SCALE;
    let north = inverse_gudermannian(geodetic_to_geocentric(wpt.latitude));
    (east.round() as i32, north.round() as i32)
}

fn icon_index(descr: &str) -> u8 {
    if let Some(i) = ICONS.iter().position(|name| name.eq_ignore_ascii_case(descr)) {
        return i as u8;
    }
    // no exact match: take the first entry related by containment, so
    // "Diamond, Green" or "Green Diamond" still map to "Diamond"
    ICONS
        .iter()
        .position(|name| {
            contains_ignore_ascii_case(descr, name) || contains_ignore_ascii_case(name, descr)
        })
        .unwrap_or(0) as u8
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn write_name(record: &mut [u8], offset: usize, len: usize, name: &str) {
    // the last byte of the field stays NUL
    let n = name.len().min(len - 1);
    record[offset..offset + n].copy_from_slice(&name.as_bytes()[..n]);
}

fn unix_now() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as u32)
        .unwrap_or(0)
}
