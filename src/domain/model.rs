use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub variation: String,
    pub hash: String,
}

/// One named group of results, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformBucket {
    pub platform: String,
    pub results: Vec<SearchResult>,
}

/// Results grouped by platform. Serializes as a JSON object whose keys keep
/// platform-table order, with "Others" last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedResults {
    pub buckets: Vec<PlatformBucket>,
}

impl ClassifiedResults {
    pub fn get(&self, platform: &str) -> Option<&[SearchResult]> {
        self.buckets
            .iter()
            .find(|b| b.platform == platform)
            .map(|b| b.results.as_slice())
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.results.len()).sum()
    }
}

impl Serialize for ClassifiedResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.platform, &bucket.results)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameReport {
    pub username: String,
    pub date: DateTime<Utc>,
    pub variations: Vec<String>,
    pub results: ClassifiedResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IpSource {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpRecord {
    pub ip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isp: Option<String>,
    pub source: IpSource,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub queried_at: DateTime<Utc>,
}

impl IpRecord {
    pub fn empty(ip: &str, source: IpSource, provider: &str) -> Self {
        Self {
            ip: ip.to_string(),
            country: None,
            country_code: None,
            region: None,
            city: None,
            postal_code: None,
            latitude: None,
            longitude: None,
            timezone: None,
            asn: None,
            org: None,
            isp: None,
            source,
            provider: provider.to_string(),
            note: None,
            queried_at: Utc::now(),
        }
    }

    /// True when the provider answered but located nothing.
    pub fn has_location(&self) -> bool {
        self.country.is_some() || self.region.is_some() || self.city.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhoneType {
    FixedLine,
    Mobile,
    TollFree,
    PremiumRate,
    SharedCost,
    Voip,
    Personal,
    Pager,
    Uan,
    Voicemail,
    Unknown,
}

impl PhoneType {
    pub fn code(self) -> u8 {
        match self {
            PhoneType::FixedLine => 0,
            PhoneType::Mobile => 1,
            PhoneType::TollFree => 3,
            PhoneType::PremiumRate => 4,
            PhoneType::SharedCost => 5,
            PhoneType::Voip => 6,
            PhoneType::Personal => 7,
            PhoneType::Pager => 8,
            PhoneType::Uan => 9,
            PhoneType::Voicemail => 10,
            PhoneType::Unknown => 99,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub number: String,
    pub valid: bool,
    pub number_type: PhoneType,
    pub type_code: u8,
    pub carrier: String,
    /// ISO 3166-1 alpha-2 region the number belongs to, e.g. `US`.
    pub region_code: String,
    /// Calling code, e.g. `1`.
    pub country_code: u16,
    pub national_number: u64,
    pub timezones: Vec<String>,
    pub e164: String,
    pub national: String,
    pub international: String,
    pub queried_at: DateTime<Utc>,
}
