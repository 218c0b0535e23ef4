/*!

  Utils for netviz development.

*/

/// Compare circuit descriptions as strings, line by line, up to indentation.
#[macro_export]
macro_rules! assert_circuit_eq {
    ($left:expr, $right:expr $(,)?) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                let left_lines: Vec<&str> = left_val.lines().map(str::trim).collect();
                let right_lines: Vec<&str> = right_val.lines().map(str::trim).collect();
                assert_eq!(left_lines, right_lines);
            }
        }
    };
    ($left:expr, $right:expr, $($arg:tt)+) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                let left_lines: Vec<&str> = left_val.lines().map(str::trim).collect();
                let right_lines: Vec<&str> = right_val.lines().map(str::trim).collect();
                assert_eq!(
                    left_lines,
                    right_lines,
                    std::format_args!($($arg)+)
                );
            }
        }
    };
}
