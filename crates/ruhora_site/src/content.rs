//! Content catalogue
//!
//! Products and journal entries are immutable `'static` records handed to
//! the sections at mount time.

use crate::error::{Result, SiteError};

/// Side of the product block the image sits on (desktop layout)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSide {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ingredient {
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RitualStep {
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Step-by-step routine shown in the ritual overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ritual {
    pub image: &'static str,
    pub steps: &'static [RitualStep],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub eyebrow: &'static str,
    pub description: &'static str,
    pub traits: &'static str,
    pub ingredients: &'static [Ingredient],
    pub image: &'static str,
    pub image_alt: &'static str,
    pub cta: &'static str,
    pub image_side: ImageSide,
    /// Prefilled text of the order message
    pub order_message: &'static str,
    pub ritual: Ritual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: u32,
    pub title: &'static str,
    pub preview: &'static str,
    pub full_text: &'static str,
    pub image: &'static str,
    pub alt: &'static str,
}

static PRODUCTS: [Product; 2] = [
    Product {
        id: "product-1",
        name: "HydraShine Skin Oil Gel",
        eyebrow: "BODY RITUAL",
        description: "A refined gel-based body oil that melts into the skin, enveloping it in \
            hydration and a soft, natural glow. Designed for daily rituals that restore comfort and calm.",
        traits: "Hydration · Comfort · Glow",
        ingredients: &[
            Ingredient {
                name: "Cocoa Butter",
                description: "Deep nourishment that seals in softness",
                icon: "/ingredients/cocoa-butter-icon.png",
            },
            Ingredient {
                name: "Cold-Pressed Oils",
                description: "Lightweight hydration that melts into skin",
                icon: "/ingredients/cold-pressed-oil-icon.png",
            },
            Ingredient {
                name: "Botanical Emollients",
                description: "Support comfort and elasticity",
                icon: "/ingredients/botanical-emollients-icon.png",
            },
        ],
        image: "/products/product-1/product_1.jpg",
        image_alt: "HydraShine Skin Oil Gel",
        cta: "Begin the Morning Ritual",
        image_side: ImageSide::Left,
        order_message: "Hello ✨\nI'd like to order HYDRASHINE SKIN OIL GEL WITH COCOA BUTTER as a \
            part of my daily self-care and nourishment ritual for skin and body.\n\nPlease guide me \
            with the details to proceed.\nThank you 🌿",
        ritual: Ritual {
            image: "/products/product-1/product_1.jpg",
            steps: &[
                RitualStep {
                    title: "Step 1: Revive & Energize",
                    description: "Begin with a warm or cool shower to awaken your senses.",
                    icon: "/icons/rituals/energize-icon.png",
                },
                RitualStep {
                    title: "Step 2: Hydrate & Nourish",
                    description: "Apply Hydrashine Skin Oil Gel generously on damp skin.",
                    icon: "/icons/rituals/applying-serum-icon.png",
                },
                RitualStep {
                    title: "Step 3: Massage & Glow",
                    description: "Massage in upward strokes, leaving skin soft, supple, and radiant.",
                    icon: "/icons/rituals/skin-care-icon.png",
                },
                RitualStep {
                    title: "Step 4: Mindful Affirmation",
                    description: "\"I step into the day with radiant skin, vitality, and a calm, \
                        confident mind.\"",
                    icon: "/icons/rituals/meditating-icon.png",
                },
            ],
        },
    },
    Product {
        id: "product-2",
        name: "Ancient Elixir Kumkumadi Thailam",
        eyebrow: "FACE RITUAL",
        description: "An ancient facial oil ritual rooted in Ayurvedic wisdom. A blend of \
            time-honored ingredients that support radiance, balance, and deep nourishment.",
        traits: "Radiance · Balance · Renewal",
        ingredients: &[
            Ingredient {
                name: "Goat Milk",
                description: "Gently nourishes, softens, and comforts skin",
                icon: "/ingredients/goat-milk-icon.png",
            },
            Ingredient {
                name: "Sandalwood",
                description: "Calming, cooling, and grounding for the skin",
                icon: "/ingredients/sandalwood-icon.png",
            },
            Ingredient {
                name: "Kesar (Saffron)",
                description: "Traditionally revered for radiant, luminous skin",
                icon: "/ingredients/saffron-icon.png",
            },
        ],
        image: "/products/product-2/product_2.png",
        image_alt: "Ancient Elixir Kumkumadi Thailam",
        cta: "Enter the Night Ritual",
        image_side: ImageSide::Right,
        order_message: "Hello ✨\nI'd love to begin my wellness ritual with ANCIENT ELIXIR KUMKUMADI \
            THAILAM as a part of my journey towards balanced skin and inner well-being.\n\nPlease \
            share the details to help me proceed with this order.\nThank you 🌿",
        ritual: Ritual {
            image: "/products/product-2/product_2.png",
            steps: &[
                RitualStep {
                    title: "Step 1: Cleanse & Center",
                    description: "Gently cleanse your face to remove the day's impurities.",
                    icon: "/icons/rituals/cleansing-face-icon.png",
                },
                RitualStep {
                    title: "Step 2: Massage & Nourish",
                    description: "Warm 2–3 drops between your palms and massage onto face and neck \
                        using slow, circular motions.",
                    icon: "/icons/rituals/skin-care-icon.png",
                },
                RitualStep {
                    title: "Step 3: Hydrate & Lock",
                    description: "Allow the oil to absorb naturally, sealing in moisture and radiance.",
                    icon: "/icons/rituals/moisturizing-icon.png",
                },
                RitualStep {
                    title: "Step 4: Mindful Affirmation",
                    description: "\"I release the day with gratitude. My skin glows, my mind is calm, \
                        and I welcome restorative rest.\"",
                    icon: "/icons/rituals/meditating-icon.png",
                },
            ],
        },
    },
];

static JOURNAL: [JournalEntry; 3] = [
    JournalEntry {
        id: 1,
        title: "The Philosophy of Wellness",
        preview: "Exploring true wellness as a balance of mind, body, and spirit.",
        full_text: "True wellness is more than skin-deep - it is a balance of mind, body, and \
            spirit. At the heart of our brand lies the belief that self-care rituals can be \
            transformative, turning everyday skincare into moments of mindfulness and calm. Each \
            product is designed not just to nourish the skin, but to create a pause in your day, a \
            gentle reminder to honor yourself.",
        image: "/images/journal/the-philosophy-of-wellness.png",
        alt: "Serene wellness philosophy imagery",
    },
    JournalEntry {
        id: 2,
        title: "Skincare as a Ritual",
        preview: "Mindful skincare transforms daily routines into moments of calm.",
        full_text: "Luxury skincare is a ritual of intention. The textures, aromas, and touch of \
            each product engage the senses, reducing stress and elevating mood. Applying oil, \
            cream, or serum mindfully encourages presence and calm, helping the mind relax while \
            the body absorbs nourishing botanicals.",
        image: "/images/journal/skincare-as-a-ritual.png",
        alt: "Mindful skincare ritual moment",
    },
    JournalEntry {
        id: 3,
        title: "Holistic Benefits",
        preview: "Restoring skin health while supporting mental well-being.",
        full_text: "The impact of mindful skincare extends beyond visible radiance. Consistent care \
            restores the skin health while supporting mental well-being - reducing tension, \
            improving confidence, and creating a sense of harmony. Our philosophy merges ancient \
            wisdom and modern luxury to nurture both body and mind.",
        image: "/images/journal/holistic-benefits.png",
        alt: "Holistic wellness and meditation",
    },
];

pub fn products() -> &'static [Product] {
    &PRODUCTS
}

pub fn product(id: &str) -> Result<&'static Product> {
    PRODUCTS
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| SiteError::UnknownProduct(id.to_string()))
}

pub fn journal_entries() -> &'static [JournalEntry] {
    &JOURNAL
}

pub fn journal_entry(id: u32) -> Result<&'static JournalEntry> {
    JOURNAL
        .iter()
        .find(|e| e.id == id)
        .ok_or(SiteError::UnknownJournalEntry(id))
}
