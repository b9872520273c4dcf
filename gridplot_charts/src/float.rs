// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `f64` math for builds without `std`.
//!
//! `core` lacks the inherent rounding, logarithm and power methods. Modules that need them
//! import [`FloatExt`] under `#[cfg(not(feature = "std"))]`, so the same method-call syntax
//! resolves to `libm` here and to the inherent methods with `std`.

/// The subset of `f64` inherent methods used by tick placement and axis scaling.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn log10(self) -> Self;
    fn ln(self) -> Self;
    fn powf(self, n: Self) -> Self;
}

/// Forwards each listed method to the `libm` function of the given name.
macro_rules! forward_to_libm {
    ($($method:ident($($arg:ident),*) => $libm:ident;)*) => {
        #[cfg(all(not(feature = "std"), feature = "libm"))]
        impl FloatExt for f64 {
            $(
                fn $method(self $(, $arg: Self)*) -> Self {
                    libm::$libm(self $(, $arg)*)
                }
            )*
        }
    };
}

forward_to_libm! {
    floor() => floor;
    ceil() => ceil;
    round() => round;
    log10() => log10;
    ln() => log;
    powf(n) => pow;
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("gridplot_charts needs the `std` or the `libm` feature for float math");
