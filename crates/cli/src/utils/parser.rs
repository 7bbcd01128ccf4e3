/// A `path[:line[:column]]` argument, with line and column converted from
/// 1-based to 0-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLocation {
    pub path: String,
    pub line: Option<usize>,
    pub column: Option<usize>,
}

pub fn parse_filepath_with_line(filepath_arg: &str) -> FileLocation {
    let whole = || FileLocation {
        path: filepath_arg.to_string(),
        line: None,
        column: None,
    };

    let Some((rest, last)) = filepath_arg.rsplit_once(':') else {
        return whole();
    };
    let Ok(last) = last.parse::<usize>() else {
        return whole();
    };

    // `path:line:column`
    if let Some((path, line)) = rest.rsplit_once(':') {
        if let Ok(line) = line.parse::<usize>() {
            return FileLocation {
                path: path.to_string(),
                line: Some(line.saturating_sub(1)),
                column: Some(last.saturating_sub(1)),
            };
        }
    }

    FileLocation {
        path: rest.to_string(),
        line: Some(last.saturating_sub(1)),
        column: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        let location = parse_filepath_with_line("src/lib.rs");
        assert_eq!(location.path, "src/lib.rs");
        assert_eq!(location.line, None);
    }

    #[test]
    fn test_line_and_column() {
        let location = parse_filepath_with_line("src/lib.rs:42");
        assert_eq!((location.path.as_str(), location.line, location.column), ("src/lib.rs", Some(41), None));

        let location = parse_filepath_with_line("src/lib.rs:42:7");
        assert_eq!((location.path.as_str(), location.line, location.column), ("src/lib.rs", Some(41), Some(6)));
    }

    #[test]
    fn test_non_numeric_suffix_is_part_of_the_path() {
        let location = parse_filepath_with_line("C:notes");
        assert_eq!(location.path, "C:notes");
        assert_eq!(location.line, None);
    }
}
