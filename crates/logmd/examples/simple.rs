//! Condensed and expanded records at every severity, then a help page printed
//! with the Dracula theme.
//!
//! Run with: `cargo run -p logmd --example simple`

use logmd::{MarkdownLogger, MarkdownRenderer, StyleConfig};

const HELP: &str = r"# logmd
logmd is your logging doctor. It will make sure your logs are in tip top shape!

It can:

- Extract error messages from log files

- Sanitize log messages in log files

## Usage

~~~
$ logmd [SUBCOMMAND] [OPTIONS]
~~~

## Global CLI Options
**-h, --help**	*show help messages for subcommands or the parent logmd command*

**-c, --config**	*set the JSON configuration for logmd*

## Subcommands
- `diagnose` - extract all errors from your logs so that you can diagnose them easier. Example:
~~~
$ logmd diagnose logs.txt
~~~
- `sterilize` - clean up the logs and make them easier to read. Example:
~~~
$ logmd sterilize logs.txt
~~~
";

fn main() {
    let condensed = MarkdownLogger::builder().with_condensed_logging().build();
    condensed.info("*hello condensed info world!*");
    condensed.debug("*hello condensed debug world!*");
    condensed.warn("*hello condensed warn world!*");
    condensed.error("*hello condensed error world!*");

    let expanded = MarkdownLogger::new();
    expanded.info("*hello expanded info world!*");
    expanded.debug("*hello expanded debug world!*");
    expanded.warn("*hello expanded warn world!*");
    expanded.error("*hello expanded error world!*");

    let dracula = MarkdownRenderer::builder()
        .with_style(StyleConfig::dracula())
        .build();
    let custom = MarkdownLogger::builder()
        .with_print_renderer(dracula)
        .build();
    custom.print(HELP);
}
