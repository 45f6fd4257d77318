use colored::Colorize;
use spritepack_pipeline::BuildSummary;

/// Prints the outcome of a build.
pub(crate) fn print_build_summary(summary: &BuildSummary) {
    if summary.pictures > 0 {
        println!(
            "  {} {} picture(s) imported",
            "+".green(),
            summary.pictures
        );
    }
    println!(
        "  {} {} animation(s) from {} spritesheet grid(s)",
        "+".green(),
        summary.animations,
        summary.grids
    );
    println!("  {} {} tag(s)", "+".green(), summary.tags);

    for name in &summary.duplicates {
        println!(
            "  {} animation '{}' defined more than once (last definition kept)",
            "!".yellow(),
            name
        );
    }

    print_digests(summary.digests.iter().map(|(b, d)| (b.name(), d.as_str())));
    println!("{} {}", "Wrote".green().bold(), summary.out.display());
}

/// Prints bucket digests, shortened to 16 hex digits.
pub(crate) fn print_digests<'a>(digests: impl IntoIterator<Item = (&'a str, &'a str)>) {
    for (bucket, digest) in digests {
        println!(
            "  {:<14} {}",
            bucket.dimmed(),
            short_digest(digest).dimmed()
        );
    }
}

pub(crate) fn short_digest(digest: &str) -> &str {
    &digest[..digest.len().min(16)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_digest() {
        assert_eq!(short_digest("0123456789abcdef0123"), "0123456789abcdef");
        assert_eq!(short_digest("abc"), "abc");
    }
}
