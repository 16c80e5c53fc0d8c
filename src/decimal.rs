//! Fixed three decimal rendering of `f32` without float formatting.
//!
//! `core::fmt` float formatting pulls in a lot of code on small targets, so
//! the value is split into an integral and a millis part which are printed as
//! integers. The fraction is truncated, not rounded: `2.9999` prints as
//! `2.999`.

use core::fmt::{self, Write};

/// An `f32` displayed as `[-]<integral>.<3 digits>`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decimal(pub f32);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut number = self.0;
        if number.is_nan() {
            return f.write_str("nan");
        }

        if number < 0.0 {
            f.write_char('-')?;
            number = -number;
        }

        if number.is_infinite() {
            return f.write_str("inf");
        }

        // every finite f32 fits in u128, and the truncated value is exact in f32
        let integral = number as u128;
        let fraction = (((number - integral as f32) * 1000.0) as u32).min(999);

        write!(f, "{}.{:03}", integral, fraction)
    }
}

/// A `fmt::Write` sink over a byte buffer that drops whatever does not fit.
///
/// Writes never fail and never touch memory past the end of the buffer. Text
/// is only cut at char boundaries, so the written part is always valid UTF-8.
pub struct Truncate<'a> {
    buf: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> Truncate<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            len: 0,
            truncated: false,
        }
    }

    /// Whether some output was dropped.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    pub fn into_str(self) -> &'a str {
        let buf: &'a [u8] = self.buf;
        core::str::from_utf8(&buf[..self.len]).unwrap_or_default()
    }
}

impl Write for Truncate<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.len;
        let mut n = s.len().min(room);
        while !s.is_char_boundary(n) {
            n -= 1;
        }

        self.buf[self.len..self.len + n].copy_from_slice(&s.as_bytes()[..n]);
        self.len += n;
        self.truncated |= n < s.len();

        Ok(())
    }
}

/// Render `number` into `buffer` and return the written part.
///
/// The length of `buffer` is the bound: output that does not fit is dropped.
pub fn float_to_string(buffer: &mut [u8], number: f32) -> &str {
    let mut out = Truncate::new(buffer);
    // Truncate never reports an error
    let _ = write!(out, "{}", Decimal(number));
    out.into_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(number: f32) -> ([u8; 48], usize) {
        let mut buf = [0u8; 48];
        let len = float_to_string(&mut buf, number).len();
        (buf, len)
    }

    macro_rules! assert_renders {
        ($number:expr, $expected:expr) => {{
            let (buf, len) = render($number);
            assert_eq!(core::str::from_utf8(&buf[..len]).unwrap(), $expected);
        }};
    }

    #[test]
    fn three_digit_fraction() {
        assert_renders!(0.25, "0.250");
        assert_renders!(0.5, "0.500");
        assert_renders!(-1.5, "-1.500");
        assert_renders!(0.1, "0.100");
        assert_renders!(123456.789, "123456.789");
    }

    #[test]
    fn sign_is_rendered_for_negative_only() {
        assert_renders!(0.0, "0.000");
        assert_renders!(-0.0, "0.000");
        assert_renders!(-0.0005, "-0.000");
        assert_renders!(-7.0, "-7.000");
        assert_renders!(7.0, "7.000");
    }

    #[test]
    fn fraction_is_truncated() {
        assert_renders!(2.9999, "2.999");
        assert_renders!(-0.0019, "-0.001");
    }

    #[test]
    fn large_and_non_finite() {
        assert_renders!(1e20, "100000002004087734272.000");
        assert_renders!(f32::NAN, "nan");
        assert_renders!(f32::INFINITY, "inf");
        assert_renders!(f32::NEG_INFINITY, "-inf");
    }

    #[test]
    fn small_buffer_truncates_in_bounds() {
        let mut buf = [0xaau8; 8];
        assert_eq!(float_to_string(&mut buf[..4], 123.456), "123.");
        assert_eq!(&buf[4..], &[0xaa; 4]);

        assert_eq!(float_to_string(&mut buf[..1], -1.5), "-");
        assert_eq!(float_to_string(&mut [], 1e30), "");
    }

    #[test]
    fn truncate_reports_dropped_output() {
        let mut buf = [0u8; 3];
        let mut out = Truncate::new(&mut buf);
        write!(out, "ab").unwrap();
        assert!(!out.is_truncated());
        write!(out, "cd").unwrap();
        assert!(out.is_truncated());
        assert_eq!(out.as_str(), "abc");
    }

    #[test]
    fn truncate_cuts_on_char_boundary() {
        let mut buf = [0u8; 3];
        let mut out = Truncate::new(&mut buf);
        write!(out, "aµµ").unwrap();
        assert_eq!(out.as_str(), "aµ");
        assert!(out.is_truncated());
    }

    #[test]
    fn display_matches_buffer_rendering() {
        let mut buf = [0u8; 16];
        let mut out = Truncate::new(&mut buf);
        write!(out, "x = {}", Decimal(-3.25)).unwrap();
        assert_eq!(out.as_str(), "x = -3.250");
    }
}
