/// Default source of the kernel command line inside the guest.
pub const PROC_CMDLINE: &str = "/proc/cmdline";
