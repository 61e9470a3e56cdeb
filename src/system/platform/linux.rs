use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn page_size_bytes() -> u64 {
        // SAFETY: sysconf has no preconditions and only reads a constant.
        let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
        if size > 0 { size as u64 } else { 0 }
    }

    fn system_memory_kb() -> Option<(u64, u64)> {
        // SAFETY: an all-zero `sysinfo` struct is valid, and the kernel only
        // writes into the buffer we hand it.
        let mut info: libc::sysinfo = unsafe { std::mem::zeroed() };
        if unsafe { libc::sysinfo(&mut info) } != 0 {
            return None;
        }
        // totalram/freeram are counted in units of mem_unit bytes.
        let unit = u64::from(info.mem_unit.max(1));
        let total_kb = (info.totalram as u64).saturating_mul(unit) / 1024;
        let free_kb = (info.freeram as u64).saturating_mul(unit) / 1024;
        Some((total_kb, free_kb))
    }
}
