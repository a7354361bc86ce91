// Macros to emit events.

#[doc(hidden)]
#[macro_export]
macro_rules! __juniper_trace_internal {
    ($trace_type:ident; $($element:expr),*) => {{
        #[cfg(feature = "tracing")]
        {
            $crate::tracing::$trace_type!($($element),*);
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __juniper_trace_debug {
    ($($element:expr),*) => {{
        $crate::__juniper_trace_internal!(debug; $($element),*)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __juniper_trace_warn {
    ($($element:expr),*) => {{
        $crate::__juniper_trace_internal!(warn; $($element),*)
    }};
}
