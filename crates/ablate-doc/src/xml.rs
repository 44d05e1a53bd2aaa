//! Indented XML rendering.

use std::fmt::Write;

use ablate_core::is_element_name;

use crate::element::Element;
use crate::error::RenderError;

const INDENT: &str = "  ";

/// Render `root` with an XML declaration and two-space indentation.
///
/// Fails on names that are not XML names and on characters XML 1.0 cannot
/// represent, even escaped. No partial output is returned.
pub(crate) fn render(root: &Element) -> Result<String, RenderError> {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    write_element(&mut out, root, 0)?;
    Ok(out)
}

fn check_name(name: &str) -> Result<(), RenderError> {
    if is_element_name(name) {
        Ok(())
    } else {
        Err(RenderError::InvalidName {
            name: name.to_owned(),
        })
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize) -> Result<(), RenderError> {
    check_name(element.name())?;
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        check_name(name)?;
        // Writing to a String cannot fail.
        let _ = write!(out, " {name}=\"{}\"", escape(element, value, Context::Attribute)?);
    }

    match (element.text(), element.children()) {
        (None, []) => out.push_str(" />\n"),
        (Some(text), []) => {
            let text = escape(element, text, Context::Text)?;
            let _ = writeln!(out, ">{text}</{}>", element.name());
        }
        (text, children) => {
            out.push('>');
            if let Some(text) = text {
                out.push_str(&escape(element, text, Context::Text)?);
            }
            out.push('\n');
            for child in children {
                write_element(out, child, depth + 1)?;
            }
            for _ in 0..depth {
                out.push_str(INDENT);
            }
            let _ = writeln!(out, "</{}>", element.name());
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    Text,
    Attribute,
}

/// The `Char` production of XML 1.0.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn escape(element: &Element, s: &str, context: Context) -> Result<String, RenderError> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '"' if context == Context::Attribute => out.push_str("&quot;"),
            '\n' if context == Context::Attribute => out.push_str("&#10;"),
            '\t' if context == Context::Attribute => out.push_str("&#9;"),
            c if !is_xml_char(c) => {
                return Err(RenderError::ForbiddenCharacter {
                    element: element.name().to_owned(),
                    code: u32::from(c),
                })
            }
            c => out.push(c),
        }
    }
    Ok(out)
}
