//! Element-aware splitting of `<speak>` documents.
//!
//! The inner content is lexed tolerantly into a forest of nodes. Sibling
//! nodes are packed greedily; an element that does not fit on its own is
//! split inside, and every piece is re-wrapped in that element's original
//! opening and closing tags, so each fragment stays balanced.

use std::borrow::Cow;

use readaloud_core::{DocumentParts, SentenceTokenizer, find_tag_end};

use super::{MIN_CONTENT_BUDGET, plain};

// ── Lexer ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Open { name: &'a str, tag: &'a str },
    Close { name: &'a str, tag: &'a str },
    SelfClosing(&'a str),
    /// Comments, CDATA, processing instructions, declarations.
    Opaque(&'a str),
}

fn lex(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = src[pos..].find('<') {
        let lt = pos + offset;
        if let Some((end, token)) = scan_construct(src, lt) {
            if text_start < lt {
                tokens.push(Token::Text(&src[text_start..lt]));
            }
            tokens.push(token);
            pos = end;
            text_start = end;
        } else {
            // A stray `<` is ordinary text.
            pos = lt + 1;
        }
    }

    if text_start < src.len() {
        tokens.push(Token::Text(&src[text_start..]));
    }
    tokens
}

fn scan_construct(src: &str, lt: usize) -> Option<(usize, Token<'_>)> {
    let rest = &src[lt..];

    for (open, close) in [("<!--", "-->"), ("<![CDATA[", "]]>"), ("<?", "?>"), ("<!", ">")] {
        if let Some(body) = rest.strip_prefix(open) {
            let end = lt + open.len() + body.find(close)? + close.len();
            return Some((end, Token::Opaque(&src[lt..end])));
        }
    }

    if let Some(after) = rest.strip_prefix("</") {
        let name = tag_name(after)?;
        let end = find_tag_end(src, lt)?;
        return Some((end, Token::Close { name, tag: &src[lt..end] }));
    }

    let name = tag_name(&rest[1..])?;
    let end = find_tag_end(src, lt)?;
    let tag = &src[lt..end];
    if tag.ends_with("/>") {
        Some((end, Token::SelfClosing(tag)))
    } else {
        Some((end, Token::Open { name, tag }))
    }
}

fn tag_name(s: &str) -> Option<&str> {
    let first = s.chars().next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    let len = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, ':' | '-' | '_' | '.')))
        .unwrap_or(s.len());
    Some(&s[..len])
}

// ── Tree ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node<'a> {
    Text(&'a str),
    Atom(&'a str),
    Element {
        open: &'a str,
        close: Cow<'a, str>,
        children: Vec<Node<'a>>,
    },
}

impl Node<'_> {
    fn len(&self) -> usize {
        match self {
            Self::Text(s) | Self::Atom(s) => s.len(),
            Self::Element { open, close, children } => {
                open.len() + close.len() + children.iter().map(Node::len).sum::<usize>()
            }
        }
    }

    fn write(&self, out: &mut String) {
        match self {
            Self::Text(s) | Self::Atom(s) => out.push_str(s),
            Self::Element { open, close, children } => {
                out.push_str(open);
                for child in children {
                    child.write(out);
                }
                out.push_str(close);
            }
        }
    }
}

struct Frame<'a> {
    name: &'a str,
    open: &'a str,
    children: Vec<Node<'a>>,
}

fn attach<'a>(stack: &mut [Frame<'a>], root: &mut Vec<Node<'a>>, node: Node<'a>) {
    match stack.last_mut() {
        Some(frame) => frame.children.push(node),
        None => root.push(node),
    }
}

fn close_top<'a>(stack: &mut Vec<Frame<'a>>, root: &mut Vec<Node<'a>>, close: Option<&'a str>) {
    if let Some(frame) = stack.pop() {
        let close = close.map_or_else(|| Cow::Owned(format!("</{}>", frame.name)), Cow::Borrowed);
        let node = Node::Element {
            open: frame.open,
            close,
            children: frame.children,
        };
        attach(stack, root, node);
    }
}

/// Build a forest from tokens. Unclosed elements are closed where their
/// parent closes (or at the end); closing tags with no open match are dropped.
fn build(tokens: Vec<Token<'_>>) -> Vec<Node<'_>> {
    let mut root = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for token in tokens {
        match token {
            Token::Text(text) => attach(&mut stack, &mut root, Node::Text(text)),
            Token::SelfClosing(tag) | Token::Opaque(tag) => {
                attach(&mut stack, &mut root, Node::Atom(tag));
            }
            Token::Open { name, tag } => stack.push(Frame {
                name,
                open: tag,
                children: Vec::new(),
            }),
            Token::Close { name, tag } => {
                let Some(depth) = stack.iter().rposition(|f| f.name == name) else {
                    tracing::debug!(tag, "Dropping unmatched closing tag");
                    continue;
                };
                while stack.len() > depth + 1 {
                    close_top(&mut stack, &mut root, None);
                }
                close_top(&mut stack, &mut root, Some(tag));
            }
        }
    }

    while !stack.is_empty() {
        close_top(&mut stack, &mut root, None);
    }
    root
}

// ── Packing ─────────────────────────────────────────────────────────

struct Packer<'t> {
    tokenizer: &'t dyn SentenceTokenizer,
}

impl Packer<'_> {
    fn pack_nodes(&self, nodes: &[Node<'_>], budget: usize) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut current = String::new();

        for node in nodes {
            let size = node.len();
            if current.len() + size <= budget {
                node.write(&mut current);
                continue;
            }

            flush(&mut current, &mut pieces);
            if size <= budget {
                node.write(&mut current);
                continue;
            }

            let mut split = self.split_node(node, budget);
            if let Some(last) = split.pop() {
                pieces.extend(split);
                current = last;
            }
        }

        flush(&mut current, &mut pieces);
        pieces
    }

    fn split_node(&self, node: &Node<'_>, budget: usize) -> Vec<String> {
        match node {
            Node::Text(text) => self.split_text(text, budget),
            Node::Atom(atom) => {
                tracing::debug!(len = atom.len(), budget, "Markup construct exceeds chunk budget");
                vec![(*atom).to_string()]
            }
            Node::Element { open, close, children } => {
                let inner_budget = budget
                    .saturating_sub(open.len() + close.len())
                    .max(MIN_CONTENT_BUDGET);
                let inner = self.pack_nodes(children, inner_budget);
                if inner.is_empty() {
                    let mut whole = String::with_capacity(node.len());
                    node.write(&mut whole);
                    return vec![whole];
                }
                inner
                    .into_iter()
                    .map(|piece| format!("{open}{piece}{close}"))
                    .collect()
            }
        }
    }

    /// Split a text node, keeping one space where the node had leading or
    /// trailing whitespace so words in neighbouring nodes stay apart.
    fn split_text(&self, text: &str, budget: usize) -> Vec<String> {
        let leading = text.starts_with(char::is_whitespace);
        let trailing = text.ends_with(char::is_whitespace);
        let inner_budget = budget.saturating_sub(usize::from(leading) + usize::from(trailing));

        let sentences = self.tokenizer.sentences(text);
        let mut pieces: Vec<String> = plain::pack(text, inner_budget.max(1), &sentences)
            .into_iter()
            .map(|range| text[range].to_string())
            .collect();

        if leading {
            if let Some(first) = pieces.first_mut() {
                first.insert(0, ' ');
            }
        }
        if trailing {
            if let Some(last) = pieces.last_mut() {
                last.push(' ');
            }
        }
        pieces
    }
}

/// Move `current` into `pieces`; whitespace-only fragments are discarded.
fn flush(current: &mut String, pieces: &mut Vec<String>) {
    let piece = std::mem::take(current);
    if !piece.trim().is_empty() {
        pieces.push(piece);
    }
}

/// Split a `<speak>` document into balanced documents of at most
/// `max_chars` bytes, each wrapped in the original root tags.
pub(super) fn chunk_document(
    document: &str,
    parts: &DocumentParts<'_>,
    max_chars: usize,
    tokenizer: &dyn SentenceTokenizer,
) -> Vec<String> {
    if document.len() <= max_chars {
        return vec![document.to_string()];
    }

    let budget = max_chars
        .saturating_sub(parts.open_tag.len() + parts.close_tag.len())
        .max(MIN_CONTENT_BUDGET);
    let nodes = build(lex(parts.inner));
    let pieces = Packer { tokenizer }.pack_nodes(&nodes, budget);

    if pieces.is_empty() {
        return vec![format!("{}{}", parts.open_tag, parts.close_tag)];
    }

    pieces
        .into_iter()
        .map(|piece| format!("{}{piece}{}", parts.open_tag, parts.close_tag))
        .collect()
}
