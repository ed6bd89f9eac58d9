use crate::model::{LineClass, ObjectKind, StructuralEntry};

/// Code portion of a line: everything before the first `//`.
pub fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// A line is a hex payload when its code portion contains a colon.
pub fn is_hex(line: &str) -> bool {
    strip_comment(line).contains(':')
}

/// Hex digits listed on a payload line, spaces removed and uppercased.
///
/// Only the field between the offset colon and the next colon (or comment) is
/// taken. Non-payload lines yield an empty string.
pub fn hex_text(line: &str) -> String {
    let code = strip_comment(line);
    let Some(field) = code.split(':').nth(1) else {
        return String::new();
    };
    field
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Line with its trailing comment and any leading `label:` removed.
pub fn code_text(line: &str) -> &str {
    let code = strip_comment(line);
    match code.split(':').nth(1) {
        Some(after_label) => after_label,
        None => code,
    }
}

/// Classify a line as hex payload, structural, or plain.
pub fn classify(line: &str) -> LineClass {
    let code = strip_comment(line);
    if code.contains(':') {
        return LineClass::HexPayload;
    }
    ObjectKind::PROBE_ORDER
        .into_iter()
        .find(|kind| code.contains(kind.marker()))
        .map(LineClass::Structural)
        .unwrap_or(LineClass::Plain)
}

/// Kind of object a structural line *starts* with, ignoring indentation.
///
/// Only such lines get a resolved path; a `Scope` never does.
pub fn declared_kind(line: &str) -> Option<ObjectKind> {
    let trimmed = line.trim_start();
    [ObjectKind::Processor, ObjectKind::Device, ObjectKind::Method, ObjectKind::Name]
        .into_iter()
        .find(|kind| trimmed.starts_with(kind.marker()))
}

/// Scan the listing once and collect every structural line in document order.
pub fn structural_entries<S: AsRef<str>>(lines: &[S]) -> Vec<StructuralEntry> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| match classify(line.as_ref()) {
            LineClass::Structural(_) => Some(StructuralEntry::new(line.as_ref(), idx)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colon_inside_comment_is_not_hex() {
        assert!(!is_hex("    Name (_HID, EisaId (\"PNP0C09\"))  // _HID: Hardware ID"));
        assert!(is_hex("    00000024: 5B 82 4B 04 45 43 30 5F  // [.K.EC0_"));
    }

    #[test]
    fn hex_text_drops_offset_and_comment() {
        assert_eq!(hex_text("    00000024: 5b 82 4B 04  // [.K."), "5B824B04");
        assert_eq!(hex_text("Device (EC0)"), "");
    }

    #[test]
    fn code_text_strips_label_and_comment() {
        assert_eq!(
            code_text("    Method (_STA, 0, NotSerialized)  // _STA: Status"),
            "    Method (_STA, 0, NotSerialized)  "
        );
        assert_eq!(code_text("0010: Return (Zero)"), " Return (Zero)");
    }
}
