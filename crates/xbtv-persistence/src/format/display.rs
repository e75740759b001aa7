//! Human-readable rendering of a schedule's program list.

use xbtv_model::Schedule;

/// Render one line per program: `<index>\t<source>\t<location>`.
///
/// Indices are 1-based. Backslash, tab, newline and carriage return inside
/// fields are escaped, so the tab delimiter is never ambiguous. An empty
/// schedule renders as the empty string.
pub fn display_schedule(schedule: &Schedule) -> String {
    let mut out = String::new();
    for (index, program) in schedule.programs().iter().enumerate() {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            index + 1,
            escape_field(program.source()),
            escape_field(program.location())
        ));
    }
    out
}

fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use xbtv_model::Program;

    #[test]
    fn test_empty_schedule_renders_nothing() {
        let schedule = Schedule::new("Empty").unwrap();
        assert_eq!(display_schedule(&schedule), "");
    }

    #[test]
    fn test_one_line_per_program_in_order() {
        let mut schedule = Schedule::new("Evening").unwrap();
        schedule.push(Program::new("local", "/foo/bar/baz"));
        schedule.push(Program::new("network", "http://example.com/live"));
        schedule.push(Program::new("local", "/foo/bar/baz"));

        assert_eq!(
            display_schedule(&schedule),
            "1\tlocal\t/foo/bar/baz\n2\tnetwork\thttp://example.com/live\n3\tlocal\t/foo/bar/baz\n"
        );
    }

    #[test]
    fn test_delimiters_inside_fields_are_escaped() {
        let mut schedule = Schedule::new("Odd").unwrap();
        schedule.push(Program::new("lo\tcal", "line1\nline2\\x"));

        assert_eq!(display_schedule(&schedule), "1\tlo\\tcal\tline1\\nline2\\\\x\n");
    }
}
