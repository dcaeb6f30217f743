//! Script types and flags

/// Bit set in an SFLG entry for net scripts.
pub const SCRIPT_FLAG_NET: u16 = 0x1;

/// Bit set in an SFLG entry for clientside scripts.
pub const SCRIPT_FLAG_CLIENTSIDE: u16 = 0x2;

/// Display name of a script activation type, or `None` for types the
/// inspector does not recognize. The numbering has a gap: 9 through 11
/// are unassigned.
pub fn script_type_name(stype: i32) -> Option<&'static str> {
    match stype {
        0 => Some("closed"),
        1 => Some("open"),
        2 => Some("respawn"),
        3 => Some("death"),
        4 => Some("enter"),
        5 => Some("pickup"),
        6 => Some("bluereturn"),
        7 => Some("redreturn"),
        8 => Some("whitereturn"),
        12 => Some("lightning"),
        13 => Some("unloading"),
        14 => Some("disconnect"),
        15 => Some("return"),
        16 => Some("event"),
        17 => Some("kill"),
        _ => None,
    }
}
