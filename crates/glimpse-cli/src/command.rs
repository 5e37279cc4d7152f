use std::str::FromStr;

use anyhow::{Context, bail};
use glimpse_engine::Rgb;

/// One line of input to the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle(usize),
    Nearest(usize),
    RenderAll,
    Clear,
    List,
    Style {
        foreground: Rgb,
        font_weight: Option<String>,
        font_size_pt: Option<u32>,
    },
    Insert {
        offset: usize,
        text: String,
    },
    Delete {
        start: usize,
        end: usize,
    },
    Write,
    Help,
    Quit,
}

pub const HELP: &str = "\
toggle <offset>                   show or hide the fragment nearest to offset
nearest <offset>                  print the fragment nearest to offset
render-all                        render every fragment not shown yet
clear                             hide every fragment
list                              list shown fragments and their images
style <#rrggbb> [weight] [size]   change the style and re-render
insert <offset> <text>            insert text (\\n for newline)
delete <start> <end>              delete a byte range
write                             save the document
help                              show this text
quit                              exit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match name {
            "toggle" => Command::Toggle(offset_arg(&args, 0, "offset")?),
            "nearest" => Command::Nearest(offset_arg(&args, 0, "offset")?),
            "render-all" => Command::RenderAll,
            "clear" => Command::Clear,
            "list" => Command::List,
            "style" => {
                let Some(color) = args.first() else {
                    bail!("style needs a colour, e.g. style #ffffff");
                };
                let foreground = color.parse::<Rgb>()?;
                let font_size_pt = match args.get(2) {
                    Some(size) => Some(
                        size.parse::<u32>()
                            .with_context(|| format!("invalid font size '{size}'"))?,
                    ),
                    None => None,
                };
                Command::Style {
                    foreground,
                    font_weight: args.get(1).map(|w| w.to_string()),
                    font_size_pt,
                }
            }
            "insert" => {
                let offset = offset_arg(&args, 0, "offset")?;
                // everything after the offset is the text, spaces included
                let text = rest
                    .trim_start()
                    .split_once(' ')
                    .map(|(_, text)| text)
                    .unwrap_or("");
                if text.is_empty() {
                    bail!("insert needs text after the offset");
                }
                Command::Insert {
                    offset,
                    text: unescape(text),
                }
            }
            "delete" => {
                let start = offset_arg(&args, 0, "start")?;
                let end = offset_arg(&args, 1, "end")?;
                if start > end {
                    bail!("delete range {start}..{end} is backwards");
                }
                Command::Delete { start, end }
            }
            "write" => Command::Write,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => bail!("empty command"),
            other => bail!("unknown command '{other}', try 'help'"),
        };
        Ok(command)
    }
}

fn offset_arg(args: &[&str], index: usize, name: &str) -> anyhow::Result<usize> {
    let Some(raw) = args.get(index) else {
        bail!("missing <{name}>");
    };
    raw.parse::<usize>()
        .with_context(|| format!("<{name}> must be a byte offset, got '{raw}'"))
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("toggle 12", Command::Toggle(12))]
    #[case("nearest 0", Command::Nearest(0))]
    #[case("render-all", Command::RenderAll)]
    #[case("clear", Command::Clear)]
    #[case("list", Command::List)]
    #[case("write", Command::Write)]
    #[case("?", Command::Help)]
    #[case("exit", Command::Quit)]
    #[case("delete 3 7", Command::Delete { start: 3, end: 7 })]
    fn parses_simple_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(line.parse::<Command>().unwrap(), expected);
    }

    #[test]
    fn insert_keeps_spaces_and_unescapes_newlines() {
        let command: Command = "insert 4 #[a + b#] done\\n".parse().unwrap();
        assert_eq!(
            command,
            Command::Insert {
                offset: 4,
                text: "#[a + b#] done\n".to_string()
            }
        );
    }

    #[test]
    fn style_with_optional_parts() {
        let command: Command = "style #eeeeee bold 14".parse().unwrap();
        assert_eq!(
            command,
            Command::Style {
                foreground: Rgb::new(0xee, 0xee, 0xee),
                font_weight: Some("bold".to_string()),
                font_size_pt: Some(14),
            }
        );

        let command: Command = "style #000".parse().unwrap();
        assert_eq!(
            command,
            Command::Style {
                foreground: Rgb::new(0, 0, 0),
                font_weight: None,
                font_size_pt: None,
            }
        );
    }

    #[rstest]
    #[case("")]
    #[case("frobnicate")]
    #[case("toggle")]
    #[case("toggle -1")]
    #[case("delete 9 2")]
    #[case("insert 3")]
    #[case("style teal")]
    #[case("style #fff bold huge")]
    fn rejects_bad_input(#[case] line: &str) {
        assert!(line.parse::<Command>().is_err(), "{line:?} should not parse");
    }
}
