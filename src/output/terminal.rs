//! Terminal summary output.

use crate::models::Cidr;
use colored::Colorize;

/// Print the before/after consolidation summary for one region.
pub fn print_summary(region: &str, before: &[Cidr], after: &[Cidr]) {
    println!(
        "#{region}# {before_cnt} blocks consolidated to {after_cnt}",
        region = region.on_blue(),
        before_cnt = before.len(),
        after_cnt = if after.len() < before.len() {
            after.len().to_string().green()
        } else {
            after.len().to_string().normal()
        },
    );

    for block in after {
        let merged = !before.contains(block);
        if merged {
            println!("{block}  {tag}", tag = "merged".on_green());
        } else {
            println!("{block}");
        }
    }
}
