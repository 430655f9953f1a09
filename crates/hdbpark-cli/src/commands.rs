//! Query command handlers for the CLI.
//!
//! These are called from `main` and from the interactive shell after the
//! reference table has been indexed. Every handler that shows live data
//! fetches a fresh availability snapshot; nothing is cached between queries.

use anyhow::Context as _;
use hdbpark_core::{AppConfig, AvailabilitySnapshot};
use hdbpark_datagov::{load_reference_csv, AvailabilityClient};
use hdbpark_resolver::{render_matches, AddressQuery, CarparkIndex, MatchResult};

/// The indexed reference table plus a client for the live feed.
pub(crate) struct Session {
    pub(crate) index: CarparkIndex,
    client: AvailabilityClient,
}

impl Session {
    /// Load and index the reference CSV and build the feed client.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV cannot be read or parsed, violates the
    /// unique carpark number invariant, or the feed URL is invalid.
    pub(crate) fn open(config: &AppConfig) -> anyhow::Result<Self> {
        let rows = load_reference_csv(&config.reference_path).with_context(|| {
            format!(
                "loading reference carparks from {}",
                config.reference_path.display()
            )
        })?;
        let index = CarparkIndex::build(rows).context("indexing reference carparks")?;
        let client =
            AvailabilityClient::from_config(config).context("building availability client")?;

        tracing::info!(
            carparks = index.len(),
            url = %client.url(),
            env = %config.env,
            "session ready"
        );
        Ok(Self { index, client })
    }

    async fn fetch_snapshot(&self) -> anyhow::Result<AvailabilitySnapshot> {
        self.client
            .fetch_availability()
            .await
            .context("fetching live carpark availability")
    }
}

/// Print one carpark joined with fresh availability.
///
/// # Errors
///
/// Returns an error if the identifier is blank or the feed fetch fails.
pub(crate) async fn run_lookup(session: &Session, identifier: &str) -> anyhow::Result<()> {
    let snapshot = session.fetch_snapshot().await?;
    match session.index.lookup_by_identifier(identifier, &snapshot)? {
        Some(unified) => println!("{unified}"),
        None => println!(
            "No information found for carpark number: {}",
            identifier.trim()
        ),
    }
    Ok(())
}

/// Resolve an address or a town and block, and print the outcome.
///
/// # Errors
///
/// Returns an error if the address or town is blank or the feed fetch fails.
pub(crate) async fn run_search(session: &Session, query: &AddressQuery) -> anyhow::Result<()> {
    let result = session.index.lookup(query)?;
    print_matches(session, &result).await
}

/// Print the latest feed update time for one carpark or for the whole feed.
///
/// # Errors
///
/// Returns an error if the feed fetch fails.
pub(crate) async fn run_last_update(
    session: &Session,
    identifier: Option<&str>,
) -> anyhow::Result<()> {
    let snapshot = session.fetch_snapshot().await?;
    let identifier = identifier.map(str::trim).filter(|id| !id.is_empty());
    match snapshot.last_updated(identifier) {
        Some(at) => println!("Latest update time: {at}"),
        None => match identifier {
            Some(id) => println!("No information found for carpark number: {id}"),
            None => println!("The availability feed returned no carparks"),
        },
    }
    Ok(())
}

/// Shows a single match in full; lists several so the user can pick one.
async fn print_matches(session: &Session, result: &MatchResult<'_>) -> anyhow::Result<()> {
    match result {
        MatchResult::Missing(miss) => println!("{miss}"),
        MatchResult::Found(records) if records.len() == 1 => {
            run_lookup(session, records[0].identifier()).await?;
        }
        MatchResult::Found(records) => {
            println!("Found {} carparks matching your input:", records.len());
            println!("{}", render_matches(records));
            println!();
            println!("Run `hdbpark lookup <CARPARK>` to see live availability for one of them.");
        }
    }
    Ok(())
}
