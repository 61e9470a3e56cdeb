/// Host queries that go through system calls rather than `/proc` files.
pub trait PlatformExtensions {
    /// Size of a memory page in bytes.
    fn page_size_bytes() -> u64;

    /// Total and free RAM in kB from the kernel's system-information call.
    fn system_memory_kb() -> Option<(u64, u64)>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod other;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use other as platform_impl;

const DEFAULT_PAGE_SIZE: u64 = 4096;

pub fn page_size_bytes() -> u64 {
    match platform_impl::Platform::page_size_bytes() {
        0 => DEFAULT_PAGE_SIZE,
        size => size,
    }
}

pub fn system_memory_kb() -> Option<(u64, u64)> {
    platform_impl::Platform::system_memory_kb()
}
