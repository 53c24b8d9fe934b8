//! 3x5 block font for the digits 0-9.

pub const ROWS: usize = 5;
pub const COLS: usize = 3;

/// Each row is a 3-bit mask, most significant bit on the left.
const FONT: [[u8; ROWS]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Whether the pixel at (`row`, `col`) of `digit` is lit. Out-of-range
/// positions are dark.
pub fn lit(digit: u8, row: i32, col: usize) -> bool {
    if !(0..ROWS as i32).contains(&row) || col >= COLS {
        return false;
    }
    let mask = FONT[usize::from(digit % 10)][row as usize];
    mask & (1 << (COLS - 1 - col)) != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(digit: u8) -> Vec<String> {
        (0..ROWS as i32)
            .map(|row| {
                (0..COLS)
                    .map(|col| if lit(digit, row, col) { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_glyph_shapes() {
        assert_eq!(render(0), vec!["###", "#.#", "#.#", "#.#", "###"]);
        assert_eq!(render(4), vec!["#.#", "#.#", "###", "..#", "..#"]);
        assert_eq!(render(7), vec!["###", "..#", "..#", "..#", "..#"]);
    }

    #[test]
    fn test_out_of_range_is_dark() {
        assert!(!lit(8, -1, 0));
        assert!(!lit(8, ROWS as i32, 0));
        assert!(!lit(8, 0, COLS));
    }

    #[test]
    fn test_every_digit_is_distinct() {
        for a in 0..10u8 {
            for b in (a + 1)..10 {
                assert_ne!(render(a), render(b), "{} and {} share a glyph", a, b);
            }
        }
    }
}
