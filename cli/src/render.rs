//! Plain text output of node trees and listings.

use std::io::{self, Write};

use figma_api::{File, Node};

const INDENT: &str = "  ";

/// Writes one line per node, children indented below their parent:
/// `TYPE id "name"`, with `(hidden)` appended to invisible nodes.
pub fn tree<W: Write>(w: &mut W, nodes: &[Node]) -> io::Result<()> {
    // Explicit stack, trees can be deeper than the call stack allows.
    let mut stack: Vec<(usize, &Node)> = nodes.iter().rev().map(|n| (0, n)).collect();

    while let Some((depth, node)) = stack.pop() {
        write!(
            w,
            "{}{} {} {:?}",
            INDENT.repeat(depth),
            node.node_type(),
            node.id(),
            node.name()
        )?;
        if node.visible() == Some(false) {
            write!(w, " (hidden)")?;
        }
        writeln!(w)?;

        if let Some(children) = node.children() {
            stack.extend(children.iter().rev().map(|c| (depth + 1, c)));
        }
    }

    Ok(())
}

/// Writes the file header followed by the tree below the document root.
pub fn file<W: Write>(w: &mut W, file: &File) -> io::Result<()> {
    writeln!(w, "{:?} (last modified {})", file.name, file.last_modified)?;
    if let Some(version) = &file.version {
        writeln!(w, "version {version}")?;
    }
    writeln!(
        w,
        "{} components, {} styles",
        file.components.len(),
        file.styles.len()
    )?;
    tree(w, file.document.children())
}

/// Tab separated columns, one row per line.
pub fn rows<W, I, R>(w: &mut W, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: std::fmt::Display,
{
    for row in rows {
        let cols: Vec<String> = row.into_iter().map(|c| c.to_string()).collect();
        writeln!(w, "{}", cols.join("\t"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FILE: &[u8] = include_bytes!("../../api/testdata/file.json");

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).expect("writing to a Vec can't fail");
        String::from_utf8(out).expect("must be utf-8")
    }

    #[test]
    fn file_outline() {
        let decoded = figma_api::decode(FILE).expect("must decode");

        assert_eq!(
            concat!(
                "\"Personal\" (last modified 2018-07-03T09:05:44.608Z)\n",
                "version 1234567890\n",
                "2 components, 1 styles\n",
                "CANVAS 72:0 \"Blog\"\n",
                "  FRAME 72:1 \"Post\"\n",
                "    RECTANGLE 72:2 \"Hero\"\n",
                "CANVAS 73:0 \"Icons\"\n",
            ),
            render(|w| file(w, &decoded))
        );
    }

    #[test]
    fn hidden_and_unknown_nodes() {
        let nodes = figma_api::decode_node_sequence(
            br#"[
                {"id": "1:1", "name": "a", "type": "GROUP", "visible": false,
                 "children": [{"id": "1:2", "name": "b", "type": "WIDGET"}]},
                {"id": "2:1", "name": "c"}
            ]"#,
        )
        .expect("must decode");

        assert_eq!(
            concat!(
                "GROUP 1:1 \"a\" (hidden)\n",
                "  WIDGET 1:2 \"b\"\n",
                "<missing> 2:1 \"c\"\n",
            ),
            render(|w| tree(w, &nodes))
        );
    }

    #[test]
    fn tab_separated_rows() {
        assert_eq!(
            "1\tWeb\n2\tApp\n",
            render(|w| rows(w, [["1", "Web"], ["2", "App"]]))
        );
    }
}
