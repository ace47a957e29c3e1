use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use autofill_app::{AppConfig, ContentSession};
use autofill_core::{domain_from_url, Phase};
use autofill_dom::PageDom;
use autofill_engine::BackgroundRelay;

/// Headless demo host: runs one content-script session against a saved
/// HTML page and the local authentication service, clicking the trigger
/// as soon as it appears.
fn main() -> anyhow::Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let (Some(page_path), Some(page_url)) = (args.next(), args.next()) else {
        bail!("usage: autofill_app <page.html> <page-url>");
    };

    let html = std::fs::read_to_string(&page_path)
        .with_context(|| format!("reading page {page_path}"))?;
    let domain =
        domain_from_url(&page_url).with_context(|| format!("no host in url {page_url}"))?;

    let config = AppConfig::load(Path::new("."));
    let relay = BackgroundRelay::connect(&config.service_settings())
        .context("connecting to the local authentication service")?;

    let mut session = ContentSession::start(PageDom::parse(&html), &domain, relay);

    let located = session.pump_until(Duration::from_secs(8), |view| {
        matches!(view.phase, Phase::Ready | Phase::Inactive | Phase::GaveUp)
    });
    if !located {
        bail!("session never settled while looking for a login form");
    }
    match session.view().phase {
        Phase::Inactive => {
            println!("no identity enrolled for {domain}; nothing to do");
            return Ok(());
        }
        Phase::GaveUp => {
            println!("no login form found on {page_path}");
            return Ok(());
        }
        _ => {}
    }

    session.click_trigger();
    session.pump_until(Duration::from_secs(8), |view| {
        view.phase == Phase::Submitted
    });

    if session.view().phase == Phase::Submitted {
        println!("form filled and submitted for {domain}");
    } else {
        println!("authentication refused for {domain}");
    }
    println!("final page:\n{}", session.page().to_html());
    Ok(())
}

fn init_logging() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let _ = CombinedLogger::init(vec![TermLogger::new(
        log::LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
