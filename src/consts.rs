//! Record signatures, sizes and field offsets.
//!
//! Signatures look like `{ format: u8, version: u8, record_length: u16 }`
//! read as one big-endian u32; the track signatures don't follow the
//! length convention (a full track record wouldn't fit in 16 bits). All
//! sizes and offsets below exclude the 4-byte signature.

pub const TRK_MAGIC: u32 = 0x0103_0000;
pub const TRK_MAGIC_OLD: u32 = 0x0102_1F70;
pub const WPT_MAGIC: u32 = 0x0202_0024;
pub const WPT_MAGIC2: u32 = 0x0203_0024; // new for 2013, same layout
pub const RTE_MAGIC: u32 = 0x0303_0088;

/// Wire value of the icon byte when a waypoint has no icon description.
pub const NO_ICON: u8 = 255;

/// Characters the firmware cannot display; stripped from every name.
pub const BAD_CHARS: &str = "\r\n\t";

pub const WPT_NAME_LEN: usize = 12;
pub const RTE_NAME_LEN: usize = 20;
pub const TRK_NAME_LEN: usize = 20;
pub const MAX_RTE_POINTS: usize = 50;

pub const WPT_RECORD_SIZE: usize = 32;
pub const WPT_NUM_OFFSET: usize = 0;
pub const WPT_STATUS_OFFSET: usize = 4;
pub const WPT_ICON_OFFSET: usize = 5;
pub const WPT_DEPTH_OFFSET: usize = 6;
pub const WPT_TIME_OFFSET: usize = 8;
pub const WPT_EAST_OFFSET: usize = 12;
pub const WPT_NORTH_OFFSET: usize = 16;
pub const WPT_NAME_OFFSET: usize = 20;

pub const RTE_RECORD_SIZE: usize = 132;
pub const RTE_NUM_OFFSET: usize = 0;
pub const RTE_COUNT_OFFSET: usize = 7;
pub const RTE_TIME_OFFSET: usize = 8;
pub const RTE_NAME_OFFSET: usize = 12;
pub const RTE_POINTS_OFFSET: usize = 32;

pub const TRK_HEADER_SIZE: usize = 64;
pub const TRK_POINT_SIZE: usize = 6;
pub const TRK_NUM_OFFSET: usize = 0;
pub const TRK_COUNT_OFFSET: usize = 4;
pub const TRK_TIME_OFFSET: usize = 8;
pub const TRK_START_EAST_OFFSET: usize = 12;
pub const TRK_START_NORTH_OFFSET: usize = 16;
pub const TRK_END_EAST_OFFSET: usize = 20;
pub const TRK_END_NORTH_OFFSET: usize = 24;
pub const TRK_SW_EAST_OFFSET: usize = 28;
pub const TRK_SW_NORTH_OFFSET: usize = 32;
pub const TRK_NE_EAST_OFFSET: usize = 36;
pub const TRK_NE_NORTH_OFFSET: usize = 40;
pub const TRK_NAME_OFFSET: usize = 44;

/// New-format track records are always 131080 bytes on disk, whatever the
/// actual point count.
pub const TRK_FILE_SIZE: usize = 131080;
pub const TRK_MAX_POINTS: usize = (TRK_FILE_SIZE - 4 - TRK_HEADER_SIZE) / TRK_POINT_SIZE;

pub const TRK_OLD_HEADER_SIZE: usize = 28;
pub const TRK_OLD_POINT_SIZE: usize = 4;

/// Old-format track files are always 8048 bytes long (the low 16 bits of
/// their signature). The name is the last [TRK_NAME_LEN] bytes of the file.
pub const TRK_OLD_FILE_SIZE: usize = 8048;
pub const TRK_OLD_NAME_OFFSET: usize = TRK_OLD_FILE_SIZE - TRK_NAME_LEN;
pub const TRK_OLD_MAX_POINTS: usize =
    (TRK_OLD_FILE_SIZE - (TRK_OLD_HEADER_SIZE + 4 + TRK_NAME_LEN)) / TRK_OLD_POINT_SIZE;

/// Icon descriptions by icon index. Indices outside the table decode to no
/// icon; encoding an unknown description falls back to index 0.
pub const ICONS: &[&str] = &[
    "Normal",    //  0
    "House",     //  1
    "Red cross", //  2
    "Fish",      //  3
    "Duck",      //  4
    "Anchor",    //  5
    "Buoy",      //  6
    "Airport",   //  7
    "Camp",      //  8
    "Danger",    //  9
    "Fuel",      // 10
    "Rock",      // 11
    "Weed",      // 12
    "Wreck",     // 13
    "Phone",     // 14
    "Coffee",    // 15
    "Beer",      // 16
    "Mug",       // 17
    "Stump",     // 18
    "Circle",    // 19
    "Diamond",   // 20
    "Flag",      // 21
    "Pattern",   // 22
    "Shower",    // 23
    "Water tap", // 24
    "Tree",      // 25
    "Recording", // 26
    "Snapshot",  // 27
];
