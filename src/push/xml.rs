//! Just enough XML to read toast notification documents: elements,
//! attributes, text, CDATA and character references. Comments,
//! processing instructions and the prolog are skipped. Anything else is
//! rejected.
use anyhow::{Error, Result, anyhow};
use winnow::ascii::{digit1, hex_digit1, multispace0, multispace1};
use winnow::combinator::{alt, delimited, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{take_till, take_until, take_while};

/// Deepest element nesting accepted; toasts need four levels
pub const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Ignored,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter_map(move |node| match node {
            Node::Element(e) if e.name == name => Some(e),
            _ => None,
        })
    }

    /// Concatenated text of every descendant text node, in document order
    pub fn inner_text(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => e.collect_text(out),
                Node::Ignored => {}
            }
        }
    }
}

/// Parse a complete document and return its root element.
pub fn parse_document(input: &str) -> Result<Element, Error> {
    document
        .parse(input)
        .map_err(|e| anyhow!("Malformed XML at offset {}", e.offset()))
}

fn document(input: &mut &str) -> ModalResult<Element> {
    delimited(
        repeat(0.., misc).map(|()| ()),
        |input: &mut &str| element(input, 0),
        repeat(0.., misc).map(|()| ()),
    )
    .parse_next(input)
}

// Whitespace, comments and processing instructions around the root
fn misc(input: &mut &str) -> ModalResult<()> {
    alt((multispace1.void(), comment, processing_instruction)).parse_next(input)
}

fn element(input: &mut &str, depth: usize) -> ModalResult<Element> {
    if depth > MAX_DEPTH {
        return Err(ErrMode::Cut(ContextError::new()));
    }

    let (tag, attributes, self_closing) = start_tag.parse_next(input)?;
    let children = if self_closing {
        Vec::new()
    } else {
        let children: Vec<Node> =
            repeat(0.., |input: &mut &str| node(input, depth + 1)).parse_next(input)?;
        end_tag(input, tag)?;
        children
    };

    Ok(Element {
        name: tag.to_string(),
        attributes,
        children,
    })
}

fn start_tag<'i>(input: &mut &'i str) -> ModalResult<(&'i str, Vec<(String, String)>, bool)> {
    (
        preceded('<', name),
        repeat(0.., attribute),
        preceded(multispace0, alt(("/>".value(true), ">".value(false)))),
    )
        .parse_next(input)
}

fn end_tag(input: &mut &str, tag: &str) -> ModalResult<()> {
    ("</", tag, multispace0, '>').void().parse_next(input)
}

fn node(input: &mut &str, depth: usize) -> ModalResult<Node> {
    alt((
        comment.value(Node::Ignored),
        processing_instruction.value(Node::Ignored),
        cdata.map(Node::Text),
        (|input: &mut &str| element(input, depth)).map(Node::Element),
        char_data.map(Node::Text),
    ))
    .parse_next(input)
}

fn name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')
    })
    .parse_next(input)
}

fn attribute(input: &mut &str) -> ModalResult<(String, String)> {
    (
        preceded(multispace1, name),
        (multispace0, '=', multispace0),
        alt((
            delimited('"', take_till(0.., '"'), '"'),
            delimited('\'', take_till(0.., '\''), '\''),
        ))
        .verify_map(decode_references),
    )
        .map(|(key, _, value)| (key.to_string(), value))
        .parse_next(input)
}

fn comment(input: &mut &str) -> ModalResult<()> {
    ("<!--", take_until(0.., "-->"), "-->").void().parse_next(input)
}

fn processing_instruction(input: &mut &str) -> ModalResult<()> {
    ("<?", take_until(0.., "?>"), "?>").void().parse_next(input)
}

fn cdata(input: &mut &str) -> ModalResult<String> {
    delimited("<![CDATA[", take_until(0.., "]]>"), "]]>")
        .map(String::from)
        .parse_next(input)
}

fn char_data(input: &mut &str) -> ModalResult<String> {
    repeat(
        1..,
        alt((
            take_till(1.., ['<', '&']).map(String::from),
            reference.map(String::from),
        )),
    )
    .map(|pieces: Vec<String>| pieces.concat())
    .parse_next(input)
}

fn reference(input: &mut &str) -> ModalResult<char> {
    delimited(
        '&',
        alt((
            preceded("#x", hex_digit1).verify_map(|hex: &str| {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            }),
            preceded('#', digit1)
                .verify_map(|dec: &str| dec.parse::<u32>().ok().and_then(char::from_u32)),
            "amp".value('&'),
            "lt".value('<'),
            "gt".value('>'),
            "quot".value('"'),
            "apos".value('\''),
        )),
        ';',
    )
    .parse_next(input)
}

fn decode_references(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return Some(String::new());
    }
    char_data.parse(raw).ok()
}
