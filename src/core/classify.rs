use crate::domain::model::{ClassifiedResults, PlatformBucket, SearchResult};
use md5::{Digest, Md5};
use std::collections::HashSet;

pub const OTHERS: &str = "Others";

/// Known platforms and the domains that identify them. Order is the tie-break
/// when a URL matches more than one entry.
pub const PLATFORMS: &[(&str, &[&str])] = &[
    ("Facebook", &["facebook.com", "fb.com"]),
    ("YouTube", &["youtube.com", "youtu.be"]),
    ("Instagram", &["instagram.com"]),
    ("TikTok", &["tiktok.com"]),
    ("GitHub", &["github.com"]),
    ("Telegram", &["t.me", "telegram.org"]),
    ("Twitter", &["twitter.com", "x.com"]),
    ("Reddit", &["reddit.com"]),
    ("LinkedIn", &["linkedin.com"]),
    ("Pinterest", &["pinterest.com"]),
    ("Snapchat", &["snapchat.com"]),
    ("Twitch", &["twitch.tv"]),
    ("Steam", &["steamcommunity.com", "steampowered.com"]),
    ("DeviantArt", &["deviantart.com"]),
    ("Medium", &["medium.com"]),
    ("Flickr", &["flickr.com"]),
];

/// Hex MD5 of title followed by url. Only used to spot duplicates.
pub fn result_hash(title: &str, url: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(title.as_bytes());
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Name of the first platform whose domain appears in `url`, or "Others".
pub fn platform_for(url: &str) -> &'static str {
    let url = url.to_lowercase();
    PLATFORMS
        .iter()
        .find(|(_, domains)| domains.iter().any(|d| url.contains(d)))
        .map(|(name, _)| *name)
        .unwrap_or(OTHERS)
}

/// Buckets results by platform; every platform is present even when empty.
pub fn classify_results(results: Vec<SearchResult>) -> ClassifiedResults {
    let mut buckets: Vec<PlatformBucket> = PLATFORMS
        .iter()
        .map(|(name, _)| name)
        .chain(std::iter::once(&OTHERS))
        .map(|name| PlatformBucket {
            platform: name.to_string(),
            results: Vec::new(),
        })
        .collect();

    for result in results {
        let platform = platform_for(&result.url);
        if let Some(bucket) = buckets.iter_mut().find(|b| b.platform == platform) {
            bucket.results.push(result);
        }
    }

    ClassifiedResults { buckets }
}

/// Keeps only the first occurrence of each hash across all buckets, walking
/// buckets in order.
pub fn remove_duplicates(classified: ClassifiedResults) -> ClassifiedResults {
    let mut seen = HashSet::new();
    let buckets = classified
        .buckets
        .into_iter()
        .map(|bucket| PlatformBucket {
            platform: bucket.platform,
            results: bucket
                .results
                .into_iter()
                .filter(|r| seen.insert(r.hash.clone()))
                .collect(),
        })
        .collect();

    ClassifiedResults { buckets }
}
