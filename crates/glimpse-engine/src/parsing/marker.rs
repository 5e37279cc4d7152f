/// Fragment delimiters.
///
/// All marker bytes live here; the scanner never hardcodes `#[` or `#]`.
pub struct FragmentMarker;

impl FragmentMarker {
    pub const OPEN: &'static [u8; 2] = b"#[";
    pub const CLOSE: &'static [u8; 2] = b"#]";
    /// A marker directly preceded by this byte is literal text.
    pub const ESCAPE: u8 = b'\\';
    /// Bytes taken by one marker.
    pub const WIDTH: usize = 2;
}
