//! Album credit aggregation
//!
//! Folds per-song credit entries into one record per person across an
//! album, then attaches best-effort Instagram handles (and, when asked,
//! profile data with an extracted contact email).
//!
//! Every upstream call is awaited in order; the result is deterministic for
//! a given catalog state.

use std::collections::HashMap;
use tracing::info;

use super::catalog::{CatalogApi, CatalogError};
use super::pacing::PacingPolicy;
use super::social_client::SocialApi;
use crate::models::{PersonCredit, Track};

/// Per-request aggregation switches
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregationOptions {
    /// Fetch Instagram profiles for found handles and extract emails
    pub resolve_contacts: bool,
}

/// Builds per-person credit records for an album
pub struct CreditAggregator<'a> {
    catalog: &'a dyn CatalogApi,
    social: Option<&'a dyn SocialApi>,
    pacing: &'a PacingPolicy,
}

impl<'a> CreditAggregator<'a> {
    pub fn new(catalog: &'a dyn CatalogApi, pacing: &'a PacingPolicy) -> Self {
        Self {
            catalog,
            social: None,
            pacing,
        }
    }

    /// Attach a social client for contact resolution
    pub fn with_social(mut self, social: Option<&'a dyn SocialApi>) -> Self {
        self.social = social;
        self
    }

    /// Aggregate credits for every track of `album_id`
    ///
    /// Any track listing or credit fetch failure aborts the whole call; no
    /// partial result is returned. Handle and profile lookups never abort.
    pub async fn aggregate_album_credits(
        &self,
        album_id: u64,
        options: AggregationOptions,
    ) -> Result<Vec<PersonCredit>, CatalogError> {
        let tracks = self.catalog.get_album_tracks(album_id).await?;
        info!(album_id, tracks = tracks.len(), "Aggregating album credits");

        let mut credits = self.collect_track_credits(&tracks).await?;
        self.attach_social_handles(&mut credits, options).await;

        info!(album_id, people = credits.len(), "Album credits aggregated");
        Ok(credits)
    }

    async fn collect_track_credits(
        &self,
        tracks: &[Track],
    ) -> Result<Vec<PersonCredit>, CatalogError> {
        let mut credits: Vec<PersonCredit> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for track in tracks {
            self.pacing.track_credits.pace().await;
            info!(song_id = track.id, title = %track.title, "Fetching credits");

            for entry in self.catalog.get_song_credits(track.id).await? {
                let index = *by_name.entry(entry.name.clone()).or_insert_with(|| {
                    credits.push(PersonCredit::from_entry(&entry));
                    credits.len() - 1
                });
                credits[index].add_song(&track.title, &entry);
            }
        }

        Ok(credits)
    }

    async fn attach_social_handles(&self, credits: &mut [PersonCredit], options: AggregationOptions) {
        for person in credits.iter_mut().filter(|p| !p.genius_url.is_empty()) {
            self.pacing.handle_lookup.pace().await;

            let handle = self.catalog.get_artist_social_handle(person.genius_id).await;

            if let Some(handle) = &handle {
                info!(name = %person.name, handle = %handle, "Found Instagram handle");

                if options.resolve_contacts {
                    if let Some(social) = self.social {
                        person.instagram_data = social.lookup_contact(handle).await.into_profile_data();
                    }
                }
            }

            person.instagram_handle = handle;
        }
    }
}
