use reconcile::{AcceptOutcome, ExtractionDetails, ReconciliationStore, Suggestion};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn wrap(&self, code: &str, s: &str) -> String {
            if self.enabled { format!("{code}{s}{RESET}") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(color, s.as_ref())
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(BOLD, s.as_ref())
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(DIM, s.as_ref())
        }
    }
}

pub fn print_report(
    store: &ReconciliationStore,
    accepted: &[AcceptOutcome],
    pending: &[Suggestion],
    details: Option<&ExtractionDetails>,
    color: bool,
) {
    let palette = ansi::Palette::new(color);
    let event = store.record();
    println!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Reconciling: \"{}\" ({})", event.name, event.id), ansi::CYAN))
    );
    println!(
        "  {} {}  {} {}  {} {}  {} {}",
        palette.dim("guests:"),
        event.guest_count,
        palette.dim("start:"),
        event.timeline.start,
        palette.dim("menu:"),
        event.menu_package,
        palette.dim("linens:"),
        event.linen_color,
    );

    if !accepted.is_empty() {
        println!("\n{}", palette.paint("━━━ Accepted ━━━", ansi::GRAY));
        for outcome in accepted {
            println!(
                "  {} {} {}",
                palette.dim(outcome.previous.to_string()),
                palette.dim("→"),
                palette.bold(palette.paint(outcome.value.to_string(), ansi::GREEN)),
            );
            if outcome.contract_update_required {
                println!("      {}", palette.paint("⚠ contract update required", ansi::RED));
            }
        }
    }

    if !store.ignored().is_empty() {
        println!("\n{}", palette.paint("━━━ Ignored ━━━", ansi::GRAY));
        for ig in store.ignored() {
            println!("  {} {} {}", palette.paint(ig.field.as_str(), ansi::BLUE), palette.dim("in"), ig.discussion_id);
        }
    }

    println!("\n{}", palette.paint("━━━ Suggestions ━━━", ansi::GRAY));
    if pending.is_empty() {
        println!("{}", palette.dim("  Nothing to reconcile"));
    }
    for (idx, s) in pending.iter().enumerate() {
        print_suggestion(idx, s, &palette);
    }

    if let Some(details) = details {
        print_candidates(details, store, &palette);
        print_metrics(details, &palette);
    }
    println!();
}

fn print_suggestion(idx: usize, s: &Suggestion, palette: &ansi::Palette) {
    println!(
        "  {} {} = {} {} {}",
        palette.paint(format!("[{idx}]"), ansi::GRAY),
        palette.paint(s.field.as_str(), ansi::BLUE),
        palette.bold(palette.paint(s.value.to_string(), ansi::GREEN)),
        palette.dim("│"),
        palette.paint(format!("{:.0}%", s.confidence * 100.0), confidence_color(s.confidence)),
    );
    println!(
        "      {} \"{}\"  {} {}",
        palette.dim("from:"),
        s.original_text.trim(),
        palette.dim("│ msg:"),
        palette.paint(&s.message_id, ansi::CYAN)
    );
    println!("      {} {}", palette.dim("id:"), palette.dim(&s.id));
}

fn print_candidates(details: &ExtractionDetails, store: &ReconciliationStore, palette: &ansi::Palette) {
    println!("\n{}", palette.paint("━━━ Candidates (before dedup) ━━━", ansi::GRAY));
    if details.candidates.is_empty() {
        println!("{}", palette.dim("  No rule matched"));
        println!("\n{}", palette.paint("Possible reasons:", ansi::YELLOW));
        println!("  • Only staff messages mention changes");
        println!("  • Rules were gated out (no digits, colors or menu words)");
        println!("  • The field is ignored for the discussion");
        println!("\n{}", palette.dim("  Tip: RECONCILE_LOG=reconcile=debug shows per-rule decisions"));
        return;
    }

    for c in &details.candidates {
        let survived = details.ranked.iter().any(|r| r.suggestion.id == c.suggestion.id);
        let mark = if store.is_accepted(&c.suggestion.id) {
            palette.paint("✓", ansi::GREEN)
        } else if survived {
            palette.paint("•", ansi::YELLOW)
        } else {
            palette.dim("✗")
        };
        println!(
            "  {} {} {} {} {}",
            mark,
            palette.paint(format!("{}/{}", c.discussion_id, c.suggestion.message_id), ansi::CYAN),
            palette.paint(format!("{}={}", c.suggestion.field, c.suggestion.value), ansi::BLUE),
            palette.dim(format!("{:.2}", c.suggestion.confidence)),
            palette.dim(format!("│ {}", c.rule)),
        );
    }
}

fn print_metrics(details: &ExtractionDetails, palette: &ansi::Palette) {
    let m = &details.metrics;
    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    println!(
        "  Messages: {} scanned, {} staff skipped",
        palette.paint(m.messages_scanned.to_string(), ansi::BLUE),
        palette.dim(m.staff_messages_skipped.to_string()),
    );
    println!(
        "  Rules: {} evaluated, {} gated, {} ignored",
        palette.paint(m.rules_evaluated.to_string(), ansi::BLUE),
        palette.dim(m.rules_gated.to_string()),
        palette.dim(m.rules_ignored.to_string()),
    );
    println!(
        "  Matches: {}  │  Dropped: {}",
        palette.paint(m.matches.to_string(), ansi::YELLOW),
        palette.dim(m.dropped.to_string()),
    );

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Extraction: {}  │  Ranking: {}",
        palette.paint(format!("{:?}", m.total), ansi::GREEN),
        palette.paint(format!("{:?}", m.extraction), ansi::CYAN),
        palette.dim(format!("{:?}", m.ranking)),
    );
}

fn confidence_color(confidence: f64) -> &'static str {
    if confidence >= 0.9 {
        ansi::GREEN
    } else if confidence >= 0.8 {
        ansi::YELLOW
    } else {
        ansi::RED
    }
}
