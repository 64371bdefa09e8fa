//! Komplete Kontrol model catalog.

use std::fmt::{self, Display, Formatter};

use crate::error::Error;

/// Native Instruments USB vendor ID.
pub const VENDOR_ID: u16 = 0x17cc;

/// LED protocol generation.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum Generation {
    Mk1,
    Mk2,
}

impl Display for Generation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mk1 => write!(f, "MK1"),
            Self::Mk2 => write!(f, "MK2"),
        }
    }
}

/// Static description of a keyboard model.
#[derive(PartialEq, Eq, Debug)]
pub struct ModelDescriptor {
    pub label: &'static str,
    pub generation: Generation,
    pub product_id: u16,
    pub keys: u8,
    /// Offset from physical key position to logical key index.
    pub key_offset: i8,
}

static MODELS: [ModelDescriptor; 3] = [
    ModelDescriptor {
        label: "Komplete Kontrol S61 MK2",
        generation: Generation::Mk2,
        product_id: 0x1620,
        keys: 61,
        key_offset: -36,
    },
    ModelDescriptor {
        label: "Komplete Kontrol S88 MK2",
        generation: Generation::Mk2,
        product_id: 0x1630,
        keys: 88,
        key_offset: -21,
    },
    ModelDescriptor {
        label: "Komplete Kontrol S49 MK2",
        generation: Generation::Mk2,
        product_id: 0x1610,
        keys: 49,
        key_offset: -36,
    },
];

/// MK1 models, only selectable with the `mk1` feature.
pub(crate) static MK1_MODELS: [ModelDescriptor; 4] = [
    ModelDescriptor {
        label: "Komplete Kontrol S61 MK1",
        generation: Generation::Mk1,
        product_id: 0x1360,
        keys: 61,
        key_offset: -36,
    },
    ModelDescriptor {
        label: "Komplete Kontrol S88 MK1",
        generation: Generation::Mk1,
        product_id: 0x1410,
        keys: 88,
        key_offset: -21,
    },
    ModelDescriptor {
        label: "Komplete Kontrol S49 MK1",
        generation: Generation::Mk1,
        product_id: 0x1350,
        keys: 49,
        key_offset: -36,
    },
    ModelDescriptor {
        label: "Komplete Kontrol S25 MK1",
        generation: Generation::Mk1,
        product_id: 0x1340,
        keys: 25,
        key_offset: -21,
    },
];

/// All selectable models.
pub fn catalog() -> impl Iterator<Item = &'static ModelDescriptor> {
    let mk1: &'static [ModelDescriptor] = if cfg!(feature = "mk1") { &MK1_MODELS[..] } else { &[] };
    MODELS.iter().chain(mk1)
}

/// Labels of all selectable models.
pub fn labels() -> Vec<&'static str> {
    catalog().map(|model| model.label).collect()
}

/// Look up a model by its exact label.
pub fn resolve(label: &str) -> Result<&'static ModelDescriptor, Error> {
    catalog().find(|model| model.label == label).ok_or_else(|| Error::UnknownModel(label.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_mk2_models() {
        let s61 = resolve("Komplete Kontrol S61 MK2").unwrap();
        assert_eq!(s61.generation, Generation::Mk2);
        assert_eq!(s61.product_id, 0x1620);
        assert_eq!(s61.keys, 61);
        assert_eq!(s61.key_offset, -36);

        let s88 = resolve("Komplete Kontrol S88 MK2").unwrap();
        assert_eq!((s88.product_id, s88.keys, s88.key_offset), (0x1630, 88, -21));

        let s49 = resolve("Komplete Kontrol S49 MK2").unwrap();
        assert_eq!((s49.product_id, s49.keys, s49.key_offset), (0x1610, 49, -36));
    }

    #[test]
    fn rejects_unknown_labels() {
        let labels =
            ["", "komplete kontrol s61 mk2", "KOMPLETE KONTROL S61 MK2", "Komplete Kontrol S25 MK2", "S61"];
        for label in &labels {
            match resolve(label) {
                Err(Error::UnknownModel(name)) => assert_eq!(name, *label),
                other => panic!("expected unknown model for {:?}, got {:?}", label, other),
            }
        }
    }

    #[test]
    fn mk1_models_follow_feature() {
        assert_eq!(resolve("Komplete Kontrol S25 MK1").is_ok(), cfg!(feature = "mk1"));
        assert!(MK1_MODELS.iter().all(|model| model.generation == Generation::Mk1));
    }

    #[test]
    fn labels_are_unique() {
        let labels = labels();
        for (i, label) in labels.iter().enumerate() {
            assert!(!labels[i + 1..].contains(label));
        }
    }
}
