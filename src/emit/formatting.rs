const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

pub fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

pub fn to_gib(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// Formats a byte size into a human-readable string with appropriate units.
///
/// Uses binary units (1024) for conversion and displays one decimal place
/// for all units except bytes.
///
/// # Examples
/// ```
/// use wwdl::emit::formatting::format_size;
///
/// assert_eq!(format_size(512), "512 B");
/// assert_eq!(format_size(1536), "1.5 KB");
/// assert_eq!(format_size(1048576), "1.0 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= KIB && unit_index < UNITS.len() - 1 {
        size /= KIB;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", size as u64, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
