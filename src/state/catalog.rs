//! Built-in wardrobe seed data

use super::data::{Category, GarmentDescriptor};

const LEATHER_JACKET_MODEL: &str =
    "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Models/master/2.0/MaterialsVariantsShoe/glTF-Binary/MaterialsVariantsShoe.glb";

struct Seed {
    id: &'static str,
    name: &'static str,
    image: &'static str,
    category: Category,
    style: &'static str,
    /// 3D preview, only a few garments have one
    model3d: Option<&'static str>,
}

/// Seed garments in display order
const SEED: &[Seed] = &[
    // ========== Traditional ==========
    Seed {
        id: "adat-batik-pria",
        name: "Kemeja Batik Solo",
        image: "https://images.unsplash.com/photo-1605908502724-9093a79a1b39?w=400",
        category: Category::Traditional,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "adat-kebaya-modern",
        name: "Kebaya Modern Brokat",
        image: "https://images.unsplash.com/photo-1632219438999-52d147361d9a?w=400",
        category: Category::Traditional,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "adat-bali-pria",
        name: "Busana Adat Bali Pria",
        image: "https://images.unsplash.com/photo-1516766453773-40d348a203f5?w=400",
        category: Category::Traditional,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "adat-minang",
        name: "Suntiang Minang",
        image: "https://images.unsplash.com/photo-1582266254565-188d5786411e?w=400",
        category: Category::Traditional,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "adat-jawa-couple",
        name: "Busana Pengantin Jawa",
        image: "https://images.unsplash.com/photo-1515934751635-c81c6bc9a2d8?w=400",
        category: Category::Traditional,
        style: "Formal",
        model3d: None,
    },

    // ========== Suits & Jackets ==========
    Seed {
        id: "man-daily-suit",
        name: "Daily Power Suit",
        image: "https://images.unsplash.com/photo-1594938298603-c8148c4dae35?w=400",
        category: Category::Suits,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "man-jacket-1",
        name: "Leather Biker Jacket",
        image: "https://images.unsplash.com/photo-1487222477894-8943e31ef7b2?w=400",
        category: Category::Outerwear,
        style: "Vintage",
        model3d: Some(LEATHER_JACKET_MODEL),
    },

    // ========== Tops & Bottoms ==========
    Seed {
        id: "man-shirt-1",
        name: "White Oxford Shirt",
        image: "https://images.unsplash.com/photo-1620012253295-c15cc3fe1d24?w=400",
        category: Category::Tops,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "man-hoodie-1",
        name: "Streetwear Hoodie",
        image: "https://images.unsplash.com/photo-1556821840-3a63f95609a7?w=400",
        category: Category::Tops,
        style: "Streetwear",
        model3d: None,
    },
    Seed {
        id: "man-polo",
        name: "Classic Polo Shirt",
        image: "https://images.unsplash.com/photo-1626557981101-aae6f84aa6a8?w=400",
        category: Category::Tops,
        style: "Casual",
        model3d: None,
    },
    Seed {
        id: "man-tshirt-black",
        name: "Essential Black Tee",
        image: "https://images.unsplash.com/photo-1583743814966-8936f5b7be1a?w=400",
        category: Category::Tops,
        style: "Casual",
        model3d: None,
    },
    Seed {
        id: "man-pants-1",
        name: "Slim Fit Chinos",
        image: "https://images.unsplash.com/photo-1473966968600-fa801b869a1a?w=400",
        category: Category::Bottoms,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "man-shorts",
        name: "Summer Chino Shorts",
        image: "https://images.unsplash.com/photo-1591195853828-11db59a44f6b?w=400",
        category: Category::Bottoms,
        style: "Casual",
        model3d: None,
    },

    // ========== Outerwear ==========
    Seed {
        id: "man-suit-1",
        name: "Navy Suit Blazer",
        image: "https://images.unsplash.com/photo-1507679799987-c73779587ccf?w=400",
        category: Category::Outerwear,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "man-denim-jacket",
        name: "Denim Trucker Jacket",
        image: "https://images.unsplash.com/photo-1576871337632-b9aef4c17ab9?w=400",
        category: Category::Outerwear,
        style: "Vintage",
        model3d: None,
    },
    Seed {
        id: "man-coat",
        name: "Wool Overcoat",
        image: "https://images.unsplash.com/photo-1544923746-87908020c78d?w=400",
        category: Category::Outerwear,
        style: "Formal",
        model3d: None,
    },
    Seed {
        id: "blazer-1",
        name: "Classic Blazer",
        image: "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?w=400",
        category: Category::Outerwear,
        style: "Formal",
        model3d: None,
    },

    // ========== Dresses ==========
    Seed {
        id: "dress-1",
        name: "Evening Silk Dress",
        image: "https://images.unsplash.com/photo-1566174053879-31528523f8ae?w=400",
        category: Category::Dresses,
        style: "Party",
        model3d: None,
    },
    Seed {
        id: "dance-ballet-1",
        name: "Classic White Tutu",
        image: "https://images.unsplash.com/photo-1518834107812-67b0b7c58434?w=400",
        category: Category::Dresses,
        style: "Formal",
        model3d: None,
    },

    // ========== Accessories ==========
    Seed {
        id: "acc-hat-1",
        name: "Beige Fedora",
        image: "https://images.unsplash.com/photo-1575428652377-a2d80e2277fc?w=400",
        category: Category::Accessories,
        style: "Vintage",
        model3d: None,
    },
    Seed {
        id: "acc-glasses-1",
        name: "Retro Sunglasses",
        image: "https://images.unsplash.com/photo-1577803645773-f96470509666?w=400",
        category: Category::Accessories,
        style: "Instagram Filter",
        model3d: None,
    },
    Seed {
        id: "acc-bag-2",
        name: "Chic Handbag",
        image: "https://images.unsplash.com/photo-1584917865442-de89df76afd3?w=400",
        category: Category::Accessories,
        style: "Party",
        model3d: None,
    },
    Seed {
        id: "acc-hat-3",
        name: "Streetwear Cap",
        image: "https://images.unsplash.com/photo-1588850561407-ed78c282e89b?w=400",
        category: Category::Accessories,
        style: "Streetwear",
        model3d: None,
    },
    Seed {
        id: "acc-earrings-1",
        name: "Pearl Drop Earrings",
        image: "https://images.unsplash.com/photo-1535632066927-ab7c9ab60908?w=400",
        category: Category::Accessories,
        style: "Formal",
        model3d: None,
    },

    // ========== Swimwear ==========
    Seed {
        id: "swim-1",
        name: "Tropical Breeze Bikini",
        image: "https://images.unsplash.com/photo-1532453288672-3a27e9be9efd?w=400",
        category: Category::Swimwear,
        style: "Casual",
        model3d: None,
    },
    Seed {
        id: "swim-2",
        name: "Sunset Glow Swimsuit",
        image: "https://images.unsplash.com/photo-1545959734-718228185d0d?w=400",
        category: Category::Swimwear,
        style: "Party",
        model3d: None,
    },
];

/// Build the default wardrobe, in display order
pub fn default_wardrobe() -> Vec<GarmentDescriptor> {
    SEED.iter()
        .map(|seed| {
            let garment = GarmentDescriptor::new(seed.id, seed.name, seed.category, seed.image)
                .with_style(seed.style);
            match seed.model3d {
                Some(model) => garment.with_model3d(model),
                None => garment,
            }
        })
        .collect()
}
