//! Explicit render memoization.
//!
//! Interactive editing re-renders the same assignment state many times
//! (handle redraws, hover, repaint). The cache keys rendered rasters by the
//! full parameter set - source, rotation, crop, filter values, preset - with
//! floats quantized to 1/1000 so the key is hashable and stable. Any state
//! change produces a new key; `invalidate_source` drops entries when the
//! underlying pixels change.
//!
//! The mirror flag is not part of the key: mirroring happens at presentation
//! time and does not affect the rendered raster.

use std::collections::HashMap;
use std::collections::VecDeque;

use crate::assignment::ImageAssignment;
use crate::raster::Raster;
use crate::Preset;

/// Default number of rendered rasters kept alive.
const DEFAULT_CAPACITY: usize = 8;

/// Quantize a float to 1/1000 for use in a hashable key.
///
/// Finer than any gesture step the controller emits, so distinct states
/// never collide and equal states always hit.
#[inline]
fn quantize(v: f64) -> i64 {
    (v * 1000.0).round() as i64
}

/// Hashable identity of one rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderKey {
    source_id: i64,
    rotation: i64,
    crop: [i64; 4],
    filters: [i64; 6],
    flags: u8,
    preset: &'static str,
    preset_color: Option<(u8, u8, u8)>,
    output_size: Option<(u32, u32)>,
}

impl RenderKey {
    /// Key for an assignment's current state at the given output size.
    pub fn for_assignment(assignment: &ImageAssignment, output_size: Option<(u32, u32)>) -> Self {
        let f = &assignment.filters;
        let flags = (f.brightness_enabled as u8)
            | (f.contrast_enabled as u8) << 1
            | (f.saturation_enabled as u8) << 2
            | (f.hue_enabled as u8) << 3
            | (f.temperature_enabled as u8) << 4
            | (f.tint_enabled as u8) << 5
            | (f.enabled as u8) << 6;

        let preset_color = match assignment.preset {
            Preset::Monochrome(c) => Some((c.r, c.g, c.b)),
            _ => None,
        };

        Self {
            source_id: assignment.source_id,
            rotation: quantize(assignment.rotation),
            crop: [
                quantize(assignment.crop.x),
                quantize(assignment.crop.y),
                quantize(assignment.crop.width),
                quantize(assignment.crop.height),
            ],
            filters: [
                quantize(f.brightness as f64),
                quantize(f.contrast as f64),
                quantize(f.saturation as f64),
                quantize(f.hue as f64),
                quantize(f.temperature as f64),
                quantize(f.tint as f64),
            ],
            flags,
            preset: assignment.preset.tag(),
            preset_color,
            output_size,
        }
    }

    fn matches_source(&self, source_id: i64) -> bool {
        self.source_id == source_id
    }
}

/// A bounded cache of rendered rasters, evicting the oldest insertion when
/// full.
#[derive(Debug)]
pub struct RenderCache {
    entries: HashMap<RenderKey, Raster>,
    order: VecDeque<RenderKey>,
    capacity: usize,
}

impl RenderCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &RenderKey) -> Option<&Raster> {
        self.entries.get(key)
    }

    /// Store a rendered raster, evicting the oldest entry when at capacity.
    pub fn insert(&mut self, key: RenderKey, raster: Raster) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, raster);
            return;
        }

        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(key.clone());
        self.entries.insert(key, raster);
    }

    /// Drop every entry rendered from the given source.
    pub fn invalidate_source(&mut self, source_id: i64) {
        self.entries.retain(|key, _| !key.matches_source(source_id));
        self.order.retain(|key| !key.matches_source(source_id));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SlotEditor, Slot};

    fn assignment(source_id: i64) -> ImageAssignment {
        SlotEditor::new(source_id, 400, 300, Slot::new(0.0, 0.0, 40.0, 30.0)).into_assignment()
    }

    fn tiny_raster(value: u8) -> Raster {
        Raster::new(2, 2, vec![value; 12])
    }

    #[test]
    fn test_same_state_same_key() {
        let a = assignment(1);
        let k1 = RenderKey::for_assignment(&a, None);
        let k2 = RenderKey::for_assignment(&a, None);
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_key_changes_with_each_component() {
        let base = assignment(1);
        let base_key = RenderKey::for_assignment(&base, None);

        let mut other = base.clone();
        other.source_id = 2;
        assert_ne!(RenderKey::for_assignment(&other, None), base_key);

        let mut other = base.clone();
        other.rotation = 15.0;
        assert_ne!(RenderKey::for_assignment(&other, None), base_key);

        let mut other = base.clone();
        other.crop.x += 1.0;
        assert_ne!(RenderKey::for_assignment(&other, None), base_key);

        let mut other = base.clone();
        other.filters.brightness = 10.0;
        assert_ne!(RenderKey::for_assignment(&other, None), base_key);

        let mut other = base.clone();
        other.filters.tint_enabled = false;
        assert_ne!(RenderKey::for_assignment(&other, None), base_key);

        let mut other = base.clone();
        other.preset = Preset::Sepia;
        assert_ne!(RenderKey::for_assignment(&other, None), base_key);

        assert_ne!(RenderKey::for_assignment(&base, Some((100, 100))), base_key);
    }

    #[test]
    fn test_mirror_flag_not_in_key() {
        let base = assignment(1);
        let mut mirrored = base.clone();
        mirrored.mirrored = true;

        assert_eq!(
            RenderKey::for_assignment(&base, None),
            RenderKey::for_assignment(&mirrored, None)
        );
    }

    #[test]
    fn test_monochrome_color_in_key() {
        use crate::color::Rgb;

        let mut a = assignment(1);
        a.preset = Preset::Monochrome(Rgb::new(255, 0, 0));
        let mut b = a.clone();
        b.preset = Preset::Monochrome(Rgb::new(0, 0, 255));

        assert_ne!(
            RenderKey::for_assignment(&a, None),
            RenderKey::for_assignment(&b, None)
        );
    }

    #[test]
    fn test_get_and_insert() {
        let mut cache = RenderCache::default();
        let key = RenderKey::for_assignment(&assignment(1), None);

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), tiny_raster(10));
        assert_eq!(cache.get(&key).unwrap().pixels[0], 10);
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let mut cache = RenderCache::default();
        let key = RenderKey::for_assignment(&assignment(1), None);

        cache.insert(key.clone(), tiny_raster(10));
        cache.insert(key.clone(), tiny_raster(20));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).unwrap().pixels[0], 20);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut cache = RenderCache::new(2);

        let k1 = RenderKey::for_assignment(&assignment(1), None);
        let k2 = RenderKey::for_assignment(&assignment(2), None);
        let k3 = RenderKey::for_assignment(&assignment(3), None);

        cache.insert(k1.clone(), tiny_raster(1));
        cache.insert(k2.clone(), tiny_raster(2));
        cache.insert(k3.clone(), tiny_raster(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&k1).is_none(), "oldest entry should be evicted");
        assert!(cache.get(&k2).is_some());
        assert!(cache.get(&k3).is_some());
    }

    #[test]
    fn test_invalidate_source() {
        let mut cache = RenderCache::default();

        let mut rotated = assignment(1);
        rotated.rotation = 30.0;

        cache.insert(RenderKey::for_assignment(&assignment(1), None), tiny_raster(1));
        cache.insert(RenderKey::for_assignment(&rotated, None), tiny_raster(2));
        cache.insert(RenderKey::for_assignment(&assignment(2), None), tiny_raster(3));

        cache.invalidate_source(1);

        assert_eq!(cache.len(), 1);
        assert!(cache
            .get(&RenderKey::for_assignment(&assignment(2), None))
            .is_some());
    }

    #[test]
    fn test_clear() {
        let mut cache = RenderCache::default();
        cache.insert(RenderKey::for_assignment(&assignment(1), None), tiny_raster(1));
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
