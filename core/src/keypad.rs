/// # Keypad
/// Read-only view over the host's 16-bit key mask: bit `k` is set while key `k` is held.
///
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Keypad(u16);

impl Keypad {
    pub fn new(mask: u16) -> Self {
        Keypad(mask)
    }

    /// Whether the key named by the low nibble of `key` is held.
    pub fn is_down(self, key: u8) -> bool {
        (self.0 >> (key & 0xF)) & 1 == 1
    }

    /// The lowest-numbered held key, if any.
    pub fn first_down(self) -> Option<u8> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as u8)
        }
    }
}
