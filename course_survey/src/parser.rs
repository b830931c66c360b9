use log::debug;
use regex::Regex;
use std::sync::LazyLock;

use crate::config::*;

/// `TYPE CATALOG_CODE NAME (N credit[s]) REST`
static COURSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[A-Z]+)\s+(?P<catalog>\S+)\s+(?P<name>.+?)\s*\((?P<credits>\d+) credits?\)\s*(?P<rest>.*)$",
    )
    .expect("Invalid course regex")
});

static CREDITS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+ credits?\)").expect("Invalid credits regex"));

/// `[EXTERNAL_CODE [SUFFIX]] [TEACHERS]`. The code must be a whole token.
static TRAILER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<code>[A-Z]{3}[0-9]{2}[A-Z])(?:\s+(?P<suffix>[A-Z]))?(?:\s+|$))?(?P<teachers>.*)$")
        .expect("Invalid trailer regex")
});

/// Survey questions that are not courses do not carry a `[...]` segment.
pub fn is_course_header(header: &str) -> bool {
    header.contains('[')
}

/// Parses the header of a survey column into a course.
///
/// ```
/// use course_survey::parser::parse_course;
///
/// let c = parse_course("Rank these [ART 101 Painting (3 credits) ABC12D Jones]")?;
/// assert_eq!(c.course_type, "ART");
/// assert_eq!(c.external_code.as_deref(), Some("ABC12D"));
/// # Ok::<(), course_survey::ParseError>(())
/// ```
pub fn parse_course(header: &str) -> Result<Course, ParseError> {
    let text = bracketed_text(header)?;
    debug!("parse_course: header: {:?} text: {:?}", header, text);

    if text.to_lowercase().contains("tutorial") {
        return parse_tutorial(header, &text);
    }

    if !CREDITS_REGEX.is_match(&text) {
        return Err(ParseError::MissingCredits {
            header: header.to_string(),
        });
    }

    let caps = COURSE_REGEX
        .captures(&text)
        .ok_or_else(|| ParseError::Malformed {
            header: header.to_string(),
        })?;

    let credits_s = &caps["credits"];
    let credits = credits_s
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidCredits {
            header: header.to_string(),
            credits: credits_s.to_string(),
        })?;

    let rest = caps["rest"].trim();
    let trailer = TRAILER_REGEX
        .captures(rest)
        .filter(|_| !rest.is_empty())
        .ok_or_else(|| ParseError::Malformed {
            header: header.to_string(),
        })?;

    let external_code = trailer.name("code").map(|code| {
        let mut s = code.as_str().to_string();
        if let Some(suffix) = trailer.name("suffix") {
            s.push_str(suffix.as_str());
        }
        s
    });

    // Without teacher text, the last token stands for the teachers.
    let teachers = match trailer["teachers"].trim() {
        "" => rest.split_whitespace().last().map(|s| s.to_string()),
        t => Some(t.to_string()),
    };

    Ok(Course {
        name: caps["name"].trim().to_string(),
        course_type: caps["type"].to_string(),
        teachers,
        catalog_code: Some(caps["catalog"].to_string()),
        external_code,
        credits: Some(credits),
        source_header: header.to_string(),
    })
}

impl Course {
    /// Writes the course back in the layout understood by `parse_course`,
    /// wrapped in brackets.
    pub fn header_text(&self) -> String {
        match (&self.catalog_code, self.credits, &self.teachers) {
            (Some(catalog), Some(credits), Some(teachers)) => {
                let unit = if credits == 1 { "credit" } else { "credits" };
                let code = self
                    .external_code
                    .as_ref()
                    .map(|c| match c.len() {
                        7 => format!("{} {} ", &c[..6], &c[6..]),
                        _ => format!("{} ", c),
                    })
                    .unwrap_or_default();
                format!(
                    "[{} {} {} ({} {}) {}{}]",
                    self.course_type, catalog, self.name, credits, unit, code, teachers
                )
            }
            _ => format!("[{}]", self.name),
        }
    }
}

fn bracketed_text(header: &str) -> Result<String, ParseError> {
    let missing = || ParseError::MissingBrackets {
        header: header.to_string(),
    };
    let start = header.find('[').ok_or_else(missing)? + 1;
    let len = header[start..].find(']').ok_or_else(missing)?;
    // Line breaks and repeated spaces are folded into single spaces.
    let text = header[start..start + len].replace('*', "");
    Ok(text.split_whitespace().collect::<Vec<&str>>().join(" "))
}

fn parse_tutorial(header: &str, text: &str) -> Result<Course, ParseError> {
    let course_type = text
        .find("in ")
        .map(|idx| text[idx + 3..].trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ParseError::MissingTutorialType {
            header: header.to_string(),
        })?;
    Ok(Course {
        name: title_case(text),
        course_type,
        teachers: None,
        catalog_code: None,
        external_code: None,
        credits: None,
        source_header: header.to_string(),
    })
}

/// Upper-cases the first letter of every run of letters and lower-cases the others.
pub fn title_case(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                res.extend(c.to_lowercase());
            } else {
                res.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            res.push(c);
            prev_is_letter = false;
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(text: &str) -> Course {
        parse_course(&format!("Rank the courses [{}]", text)).unwrap()
    }

    #[test]
    fn general_header() {
        let c = parse("ART 101 Painting (3 credits) ABC12D Jones");
        assert_eq!(c.name, "Painting");
        assert_eq!(c.course_type, "ART");
        assert_eq!(c.catalog_code.as_deref(), Some("101"));
        assert_eq!(c.external_code.as_deref(), Some("ABC12D"));
        assert_eq!(c.credits, Some(3));
        assert_eq!(c.teachers.as_deref(), Some("Jones"));
        assert_eq!(
            c.source_header,
            "Rank the courses [ART 101 Painting (3 credits) ABC12D Jones]"
        );
    }

    #[test]
    fn singular_credit() {
        let c = parse("MUS 110A Choir (1 credit) Smith");
        assert_eq!(c.credits, Some(1));
        assert_eq!(c.catalog_code.as_deref(), Some("110A"));
        assert_eq!(c.external_code, None);
        assert_eq!(c.teachers.as_deref(), Some("Smith"));
    }

    #[test]
    fn multi_word_name_and_asterisks() {
        let c = parse("HIST 220 *Modern* European History (4 credits) HEX33B Lee");
        assert_eq!(c.name, "Modern European History");
        assert_eq!(c.credits, Some(4));
        assert_eq!(c.external_code.as_deref(), Some("HEX33B"));
    }

    #[test]
    fn external_code_pattern_mismatch_goes_to_teachers() {
        let c = parse("ART 101 Painting (3 credits) AB12C Smith");
        assert_eq!(c.external_code, None);
        assert_eq!(c.teachers.as_deref(), Some("AB12C Smith"));

        let c = parse("ART 101 Painting (3 credits) ABC12DE Smith");
        assert_eq!(c.external_code, None);
        assert_eq!(c.teachers.as_deref(), Some("ABC12DE Smith"));
    }

    #[test]
    fn external_code_with_section_letter() {
        let c = parse("SCI 150 Chemistry (4 credits) SCS22H L Okafor and Brandt");
        assert_eq!(c.external_code.as_deref(), Some("SCS22HL"));
        assert_eq!(c.teachers.as_deref(), Some("Okafor and Brandt"));
    }

    #[test]
    fn code_without_teachers() {
        let c = parse("ART 101 Painting (3 credits) ABC12D");
        assert_eq!(c.external_code.as_deref(), Some("ABC12D"));
        assert_eq!(c.teachers.as_deref(), Some("ABC12D"));

        let c = parse("SCI 150 Chemistry (4 credits) SCS22H L");
        assert_eq!(c.external_code.as_deref(), Some("SCS22HL"));
        assert_eq!(c.teachers.as_deref(), Some("L"));
    }

    #[test]
    fn line_breaks_inside_brackets() {
        let c = parse_course("Rank [ART 101 Painting and\nDrawing (3 credits)\nABC12D Jones\r\n]").unwrap();
        assert_eq!(c.name, "Painting and Drawing");
        assert_eq!(c.external_code.as_deref(), Some("ABC12D"));
        assert_eq!(c.teachers.as_deref(), Some("Jones"));

        let c = parse_course("Tutorials [Reading Tutorial in\nENG]").unwrap();
        assert_eq!(c.course_type, "ENG");
    }

    #[test]
    fn tutorial_header() {
        let c = parse_course("Tutorials [Writing Tutorial in WRIT]").unwrap();
        assert_eq!(c.name, "Writing Tutorial In Writ");
        assert_eq!(c.course_type, "WRIT");
        assert_eq!(c.teachers, None);
        assert_eq!(c.catalog_code, None);
        assert_eq!(c.external_code, None);
        assert_eq!(c.credits, None);
    }

    #[test]
    fn tutorial_is_case_insensitive() {
        let c = parse_course("x [TUTORIAL in MATH*]").unwrap();
        assert_eq!(c.course_type, "MATH");
        assert_eq!(c.name, "Tutorial In Math");
    }

    #[test]
    fn tutorial_without_type() {
        let err = parse_course("x [Writing Tutorial]").unwrap_err();
        assert!(matches!(err, ParseError::MissingTutorialType { .. }));
    }

    #[test]
    fn missing_brackets() {
        assert!(matches!(
            parse_course("ART 101 Painting (3 credits) Jones").unwrap_err(),
            ParseError::MissingBrackets { .. }
        ));
        assert!(matches!(
            parse_course("x [ART 101 Painting (3 credits) Jones").unwrap_err(),
            ParseError::MissingBrackets { .. }
        ));
    }

    #[test]
    fn missing_or_bad_credits() {
        assert!(matches!(
            parse_course("x [ART 101 Painting Jones]").unwrap_err(),
            ParseError::MissingCredits { .. }
        ));
        assert!(matches!(
            parse_course("x [ART 101 Painting (three credits) Jones]").unwrap_err(),
            ParseError::MissingCredits { .. }
        ));
        assert!(matches!(
            parse_course("x [ART 101 Painting (99999999999 credits) Jones]").unwrap_err(),
            ParseError::InvalidCredits { .. }
        ));
    }

    #[test]
    fn too_few_tokens() {
        for text in [
            "ART (3 credits) Jones",
            "ART 101 (3 credits) Jones",
            "ART 101 Painting (3 credits)",
            "art 101 Painting (3 credits) Jones",
        ] {
            let err = parse_course(&format!("x [{}]", text)).unwrap_err();
            assert!(matches!(err, ParseError::Malformed { .. }), "{}", text);
        }
    }

    #[test]
    fn header_text_round_trip() {
        let originals = [
            "ART 101 Painting (3 credits) ABC12D Jones",
            "MUS 110A Choir (1 credit) Smith",
            "SCI 150 Organic Chemistry (4 credits) SCS22H L Okafor and Brandt",
            "ENG TBD Poetry Workshop (2 credits) Rivera",
        ];
        for text in originals {
            let c = parse(text);
            let again = parse_course(&c.header_text()).unwrap();
            assert_eq!(again.name, c.name);
            assert_eq!(again.course_type, c.course_type);
            assert_eq!(again.teachers, c.teachers);
            assert_eq!(again.catalog_code, c.catalog_code);
            assert_eq!(again.external_code, c.external_code);
            assert_eq!(again.credits, c.credits);
        }
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("math TUTORIAL in ALG2"), "Math Tutorial In Alg2");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }
}
