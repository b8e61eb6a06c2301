use crate::domain::model::IpRecord;
use std::collections::{HashMap, VecDeque};
use std::net::Ipv4Addr;

/// Fixed-capacity memo of successful IP lookups. Entries never expire; the
/// least recently used one is evicted when a new address would exceed capacity.
#[derive(Debug)]
pub struct IpCache {
    capacity: usize,
    entries: HashMap<Ipv4Addr, IpRecord>,
    // front = least recently used
    order: VecDeque<Ipv4Addr>,
}

impl IpCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, ip: &Ipv4Addr) -> Option<IpRecord> {
        let record = self.entries.get(ip)?.clone();
        self.touch(ip);
        Some(record)
    }

    pub fn insert(&mut self, ip: Ipv4Addr, record: IpRecord) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.insert(ip, record).is_some() {
            self.touch(&ip);
            return;
        }
        self.order.push_back(ip);
        while self.entries.len() > self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                    tracing::debug!("Evicted {} from IP cache", oldest);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, ip: &Ipv4Addr) {
        if let Some(pos) = self.order.iter().position(|k| k == ip) {
            self.order.remove(pos);
        }
        self.order.push_back(*ip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::IpSource;

    fn record(ip: Ipv4Addr) -> IpRecord {
        IpRecord::empty(&ip.to_string(), IpSource::Primary, "ipapi.co")
    }

    fn addr(last: u8) -> Ipv4Addr {
        Ipv4Addr::new(10, 0, 0, last)
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let mut cache = IpCache::new(3);
        for i in 0..10 {
            cache.insert(addr(i), record(addr(i)));
            assert!(cache.len() <= 3);
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get(&addr(9)).is_some());
        assert!(cache.get(&addr(0)).is_none());
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let mut cache = IpCache::new(2);
        cache.insert(addr(1), record(addr(1)));
        cache.insert(addr(2), record(addr(2)));

        // reading 1 makes 2 the eviction candidate
        assert!(cache.get(&addr(1)).is_some());
        cache.insert(addr(3), record(addr(3)));

        assert!(cache.get(&addr(1)).is_some());
        assert!(cache.get(&addr(2)).is_none());
        assert!(cache.get(&addr(3)).is_some());
    }

    #[test]
    fn test_reinsert_does_not_grow() {
        let mut cache = IpCache::new(2);
        cache.insert(addr(1), record(addr(1)));
        cache.insert(addr(1), record(addr(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_large_capacity_allocates_lazily() {
        let mut cache = IpCache::new(usize::MAX);
        assert!(cache.is_empty());
        cache.insert(addr(1), record(addr(1)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_capacity_stores_nothing() {
        let mut cache = IpCache::new(0);
        cache.insert(addr(1), record(addr(1)));
        assert!(cache.is_empty());
    }
}
