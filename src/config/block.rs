//! Segmentation of configuration text into interface blocks.
//!
//! A block opens at an `interface <name>` line and runs until a line consisting
//! solely of the `!` terminator, or end of text. An `interface` line met before
//! the terminator belongs to the open block.
//!
//! ```text
//! interface GigabitEthernet0/0      <- opens block "GigabitEthernet0/0"
//!  description link to SW1          <- body
//!  ip address 10.0.0.1 255.255.255.0
//! !                                 <- closes block
//! ```

const TERMINATOR: &str = "!";

/// One interface block; `body` excludes the opening `interface` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceBlock<'a> {
    pub name: &'a str,
    pub body: &'a str,
}

/// Lazy iterator over the interface blocks of one configuration text.
#[derive(Debug, Clone)]
pub struct InterfaceBlocks<'a> {
    text: &'a str,
    pos: usize,
}

pub fn interface_blocks(text: &str) -> InterfaceBlocks<'_> {
    InterfaceBlocks { text, pos: 0 }
}

impl<'a> InterfaceBlocks<'a> {
    /// Next line starting at byte offset `at`: (line without newline, offset after it).
    fn line_at(&self, at: usize) -> Option<(&'a str, usize)> {
        let text: &'a str = self.text;
        if at >= text.len() {
            return None;
        }
        let rest = &text[at..];
        match rest.find('\n') {
            Some(i) => Some((&rest[..i], at + i + 1)),
            None => Some((rest, text.len())),
        }
    }
}

impl<'a> Iterator for InterfaceBlocks<'a> {
    type Item = InterfaceBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        // 1) Skip to the next interface marker.
        let (name, body_start) = loop {
            let (line, next) = self.line_at(self.pos)?;
            self.pos = next;
            if let Some(name) = interface_name(line) {
                break (name, next);
            }
        };

        // 2) Extend the body up to the terminator or EOF.
        let mut body_end = body_start;
        while let Some((line, next)) = self.line_at(self.pos) {
            self.pos = next;
            if line.trim() == TERMINATOR {
                break;
            }
            body_end = next;
        }

        Some(InterfaceBlock {
            name,
            body: &self.text[body_start..body_end],
        })
    }
}

/// `interface Gi0/1` => Some("Gi0/1"); anything else => None.
fn interface_name(line: &str) -> Option<&str> {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some("interface"), Some(name)) => Some(name),
        _ => None,
    }
}
