//! Conversion of appended values into message text.

use std::borrow::Cow;
use std::fmt::{self, Write as _};

/// Value that can be appended to a [`Handle`](crate::Handle).
///
/// Implemented for every integer and floating-point width, `bool`, `char`,
/// string types, raw pointers and [`fmt::Arguments`]. Wrap any other
/// [`Display`](fmt::Display) type in [`Displayed`] to append it.
pub trait LogValue {
    /// Appends the textual form of `self` to `out`.
    fn render(&self, out: &mut String);
}

macro_rules! display_log_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl LogValue for $ty {
                #[inline]
                fn render(&self, out: &mut String) {
                    let _ = write!(out, "{self}");
                }
            }
        )*
    };
}

display_log_value!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);

impl LogValue for str {
    #[inline]
    fn render(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl LogValue for String {
    #[inline]
    fn render(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl LogValue for Cow<'_, str> {
    #[inline]
    fn render(&self, out: &mut String) {
        out.push_str(self);
    }
}

impl LogValue for fmt::Arguments<'_> {
    fn render(&self, out: &mut String) {
        let _ = out.write_fmt(*self);
    }
}

impl<T: ?Sized> LogValue for *const T {
    fn render(&self, out: &mut String) {
        let _ = write!(out, "{:#X}", self.addr());
    }
}

impl<T: ?Sized> LogValue for *mut T {
    fn render(&self, out: &mut String) {
        self.cast_const().render(out);
    }
}

impl<T: LogValue + ?Sized> LogValue for &T {
    #[inline]
    fn render(&self, out: &mut String) {
        (**self).render(out);
    }
}

/// Adapter appending any [`Display`](fmt::Display) value.
///
/// # Examples
///
/// ```
/// use logging::{Displayed, LogValue};
/// use std::net::Ipv4Addr;
///
/// let mut out = String::new();
/// Displayed(Ipv4Addr::LOCALHOST).render(&mut out);
/// assert_eq!(out, "127.0.0.1");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Displayed<T>(pub T);

impl<T: fmt::Display> LogValue for Displayed<T> {
    fn render(&self, out: &mut String) {
        let _ = write!(out, "{}", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered<T: LogValue + ?Sized>(value: &T) -> String {
        let mut out = String::new();
        value.render(&mut out);
        out
    }

    #[test]
    fn zero_renders_as_zero_for_every_width() {
        macro_rules! assert_zero {
            ($($value:expr),* $(,)?) => {
                $( assert_eq!(rendered(&$value), "0", stringify!($value)); )*
            };
        }

        assert_zero!(
            0_i8, 0_i16, 0_i32, 0_i64, 0_i128, 0_isize, 0_u8, 0_u16, 0_u32, 0_u64, 0_u128,
            0_usize, 0.0_f32, 0.0_f64,
        );
    }

    #[test]
    fn floats_use_shortest_representation() {
        assert_eq!(rendered(&1.5_f64), "1.5");
        assert_eq!(rendered(&0.25_f32), "0.25");
    }

    #[test]
    fn strings_render_verbatim() {
        assert_eq!(rendered("plain"), "plain");
        assert_eq!(rendered(&String::from("owned")), "owned");
        assert_eq!(rendered(&Cow::Borrowed("cow")), "cow");
        assert_eq!(rendered(&format_args!("{}-{}", 1, 2)), "1-2");
    }

    #[test]
    fn pointers_render_in_upper_hex() {
        let null: *const u8 = std::ptr::null();
        assert_eq!(rendered(&null), "0x0");

        let fake = std::ptr::without_provenance::<u8>(0xBEEF);
        assert_eq!(rendered(&fake), "0xBEEF");

        let null_mut: *mut u32 = std::ptr::null_mut();
        assert_eq!(rendered(&null_mut), "0x0");
    }

    #[test]
    fn booleans_and_chars() {
        assert_eq!(rendered(&true), "true");
        assert_eq!(rendered(&'x'), "x");
    }
}
