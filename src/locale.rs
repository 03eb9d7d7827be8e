//! Numeric-locale guard for engine opens.
//!
//! C parsing engines read numeric literals under the process-wide
//! `LC_NUMERIC` setting, so a host running in a comma-decimal locale would
//! silently misparse coordinates. The guard forces the "C" locale for the
//! duration of an engine open and restores the previous value when dropped,
//! on every exit path.
//!
//! `LC_NUMERIC` is process-global state: callers opening documents from
//! several threads at once must serialize those opens themselves.

#[cfg(unix)]
mod imp {
    use std::ffi::{CStr, CString};

    pub struct NumericLocaleGuard {
        saved: Option<CString>,
    }

    impl NumericLocaleGuard {
        pub fn new() -> NumericLocaleGuard {
            // setlocale returns a pointer into static storage, so the
            // current value must be copied out before it is overwritten.
            let saved = unsafe {
                let current = libc::setlocale(libc::LC_NUMERIC, std::ptr::null());
                if current.is_null() {
                    None
                } else {
                    Some(CStr::from_ptr(current).to_owned())
                }
            };
            unsafe {
                libc::setlocale(libc::LC_NUMERIC, b"C\0".as_ptr().cast());
            }
            NumericLocaleGuard { saved }
        }
    }

    impl Drop for NumericLocaleGuard {
        fn drop(&mut self) {
            if let Some(saved) = &self.saved {
                unsafe {
                    libc::setlocale(libc::LC_NUMERIC, saved.as_ptr());
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    pub struct NumericLocaleGuard;

    impl NumericLocaleGuard {
        pub fn new() -> NumericLocaleGuard {
            NumericLocaleGuard
        }
    }
}

pub(crate) use imp::NumericLocaleGuard;
