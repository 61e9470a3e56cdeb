use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn page_size_bytes() -> u64 {
        0
    }

    fn system_memory_kb() -> Option<(u64, u64)> {
        None
    }
}
