//! Static demo dataset. Cross references between tables are indices into
//! the sibling slices.

use rust_decimal::Decimal;

use crate::entity::{orders::OrderStatus, user_profiles::UserType};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "Admin123!";
pub const DEMO_PASSWORD: &str = "Kala123!";
pub const EMAIL_DOMAIN: &str = "kala.local";

pub const PROFILE_STATE: &str = "India";
pub const PROFILE_PINCODE: &str = "302001";

pub const ARTISAN_PHONE: &str = "+91-9000011122";

pub const STORY_AUTHOR: &str = "Kala Editorial";
pub const STORY_IMAGE: &str = "stories/heritage-textiles.jpg";

pub fn email_for(username: &str) -> String {
    format!("{username}@{EMAIL_DOMAIN}")
}

pub struct Account {
    pub username: &'static str,
    pub user_type: UserType,
    pub phone: &'static str,
    pub city: &'static str,
}

impl Account {
    pub fn address(&self) -> String {
        format!("{} Heritage Street, Craft Block", self.city)
    }

    pub fn profile_image(&self) -> &'static str {
        match self.user_type {
            UserType::Buyer => "profiles/buyer1.jpg",
            UserType::Seller => "profiles/buyer2.jpg",
        }
    }
}

/// Buyers first, then sellers. Seller fixtures refer to these by index.
pub const ACCOUNTS: &[Account] = &[
    Account {
        username: "neha",
        user_type: UserType::Buyer,
        phone: "+91-9876543210",
        city: "Jaipur",
    },
    Account {
        username: "vikram",
        user_type: UserType::Buyer,
        phone: "+91-9898989898",
        city: "Ahmedabad",
    },
    Account {
        username: "sadbhav",
        user_type: UserType::Seller,
        phone: "+91-9000000001",
        city: "Jaipur",
    },
    Account {
        username: "raaga",
        user_type: UserType::Seller,
        phone: "+91-9000000002",
        city: "Kolkata",
    },
    Account {
        username: "sundar",
        user_type: UserType::Seller,
        phone: "+91-9000000003",
        city: "Chennai",
    },
];

pub struct Taxon {
    pub name: &'static str,
    pub description: &'static str,
}

pub const REGIONS: &[Taxon] = &[
    Taxon {
        name: "Rajasthan",
        description: "Vibrant desert culture with block printing, blue pottery, and mirror work.",
    },
    Taxon {
        name: "Gujarat",
        description: "Home to Ajrakh, Patola, and folk embroidery traditions.",
    },
    Taxon {
        name: "West Bengal",
        description: "Known for Kantha, terracotta, and storytelling through textiles.",
    },
    Taxon {
        name: "Tamil Nadu",
        description: "Celebrated for Kalamkari, bronze casting, and temple arts.",
    },
];

pub fn cultural_heritage(region: &str) -> String {
    format!("{region} preserves legacy craft communities and heritage guilds.")
}

pub const CATEGORIES: &[Taxon] = &[
    Taxon {
        name: "Textiles",
        description: "Handwoven stoles, sarees, and throws.",
    },
    Taxon {
        name: "Pottery",
        description: "Terracotta and glazed ceramic pieces.",
    },
    Taxon {
        name: "Jewelry",
        description: "Silver, beadwork, and folk accessories.",
    },
    Taxon {
        name: "Paintings",
        description: "Narrative paintings and wall art.",
    },
];

pub struct ArtisanFixture {
    pub name: &'static str,
    pub bio: &'static str,
    pub specialty: &'static str,
    pub years: i32,
    pub region: usize,
    pub featured: bool,
}

pub const ARTISANS: &[ArtisanFixture] = &[
    ArtisanFixture {
        name: "Meera Sharma",
        bio: "Blue pottery artisan specializing in floral glaze work.",
        specialty: "Blue Pottery",
        years: 12,
        region: 0,
        featured: true,
    },
    ArtisanFixture {
        name: "Arjun Patel",
        bio: "Ajrakh block printer with a focus on natural dyes.",
        specialty: "Ajrakh Printing",
        years: 18,
        region: 1,
        featured: true,
    },
    ArtisanFixture {
        name: "Riya Sen",
        bio: "Kantha storyteller bringing heritage motifs to modern throws.",
        specialty: "Kantha Embroidery",
        years: 10,
        region: 2,
        featured: false,
    },
    ArtisanFixture {
        name: "Karthik Iyer",
        bio: "Kalamkari painter known for temple-inspired wall art.",
        specialty: "Kalamkari",
        years: 15,
        region: 3,
        featured: false,
    },
];

pub struct SellerFixture {
    /// Index into [`ACCOUNTS`].
    pub account: usize,
    pub shop_name: &'static str,
    pub description: &'static str,
    /// Index into [`REGIONS`]; the shop's work-location state.
    pub region: usize,
    pub logo: &'static str,
}

pub const SELLER_PHONE: &str = "+91-9000000000";
pub const BANK_ACCOUNT: &str = "1234567890";
pub const BANK_NAME: &str = "Kala Bank";
pub const IFSC_CODE: &str = "KALA0001234";

pub const SELLERS: &[SellerFixture] = &[
    SellerFixture {
        account: 2,
        shop_name: "Sadbhav Crafts",
        description: "Curated heritage crafts from Rajasthan.",
        region: 0,
        logo: "shop_logos/sadbhav-crafts.jpg",
    },
    SellerFixture {
        account: 3,
        shop_name: "Raaga Studio",
        description: "Textile studio celebrating Bengal artisans.",
        region: 2,
        logo: "shop_logos/raaga-studio.jpg",
    },
    SellerFixture {
        account: 4,
        shop_name: "Sundar Collective",
        description: "Southern crafts and ritual art pieces.",
        region: 3,
        logo: "shop_logos/sundar-collective.jpg",
    },
];

pub struct ProductFixture {
    pub name: &'static str,
    pub description: &'static str,
    pub category: usize,
    pub region: usize,
    pub artisan: usize,
    pub seller: usize,
    /// Whole rupees.
    pub price: i64,
    pub image: &'static str,
    pub featured: bool,
    pub stock: i32,
}

/// Markup between the list price and the struck-through original price.
pub const ORIGINAL_PRICE_MARKUP: i64 = 400;

impl ProductFixture {
    pub fn price(&self) -> Decimal {
        rupees(self.price)
    }

    pub fn original_price(&self) -> Decimal {
        rupees(self.price + ORIGINAL_PRICE_MARKUP)
    }
}

pub const PRODUCTS: &[ProductFixture] = &[
    ProductFixture {
        name: "Blue Pottery Vase",
        description: "Hand-painted blue pottery vase with floral patterns.",
        category: 1,
        region: 0,
        artisan: 0,
        seller: 0,
        price: 2499,
        image: "products/blue-pottery-vase.jpg",
        featured: true,
        stock: 12,
    },
    ProductFixture {
        name: "Ajrakh Cotton Stole",
        description: "Naturally dyed Ajrakh stole with geometric motifs.",
        category: 0,
        region: 1,
        artisan: 1,
        seller: 0,
        price: 1899,
        image: "products/ajrakh-stole.jpg",
        featured: true,
        stock: 25,
    },
    ProductFixture {
        name: "Terracotta Lamp",
        description: "Handcrafted terracotta lamp with cutwork design.",
        category: 1,
        region: 2,
        artisan: 2,
        seller: 1,
        price: 1599,
        image: "products/terracotta-lamp.jpg",
        featured: false,
        stock: 18,
    },
    ProductFixture {
        name: "Kalamkari Wall Art",
        description: "Detailed Kalamkari wall art inspired by temple narratives.",
        category: 3,
        region: 3,
        artisan: 3,
        seller: 2,
        price: 3199,
        image: "products/kalamkari-wall-art.jpg",
        featured: true,
        stock: 8,
    },
    ProductFixture {
        name: "Silver Jhumkas",
        description: "Hand-finished silver jhumkas with bead detailing.",
        category: 2,
        region: 1,
        artisan: 1,
        seller: 2,
        price: 1299,
        image: "products/silver-jhumkas.jpg",
        featured: true,
        stock: 32,
    },
    ProductFixture {
        name: "Kantha Throw",
        description: "Soft Kantha throw with layered storytelling motifs.",
        category: 0,
        region: 2,
        artisan: 2,
        seller: 1,
        price: 2799,
        image: "products/kantha-throw.jpg",
        featured: false,
        stock: 14,
    },
];

pub struct StoryFixture {
    pub title: &'static str,
    pub content: &'static str,
    pub region: usize,
}

pub const STORIES: &[StoryFixture] = &[
    StoryFixture {
        title: "Threads of the Desert",
        content: "Rajasthan's textile heritage blends color, mirror work, and nomadic tales.",
        region: 0,
    },
    StoryFixture {
        title: "Ajrakh and the Rhythm of Print",
        content: "Ajrakh printing is a ritual of dye, patience, and geometry.",
        region: 1,
    },
    StoryFixture {
        title: "Kantha: Stories in Stitches",
        content: "Bengal's Kantha reflects memory, daily life, and resilience.",
        region: 2,
    },
    StoryFixture {
        title: "Temple Murals and Kalamkari",
        content: "Tamil Nadu's Kalamkari connects myth, craft, and devotion.",
        region: 3,
    },
];

pub struct PostFixture {
    pub account: usize,
    pub content: &'static str,
}

pub const POSTS: &[PostFixture] = &[
    PostFixture {
        account: 0,
        content: "Visited the artisans market today. The detailing was incredible.",
    },
    PostFixture {
        account: 1,
        content: "Just got my handcrafted order. Quality is amazing and delivery was smooth.",
    },
    PostFixture {
        account: 2,
        content: "New hand-painted collection just dropped this week.",
    },
    PostFixture {
        account: 3,
        content: "Working on fresh textile patterns inspired by Bengal heritage.",
    },
    PostFixture {
        account: 4,
        content: "Thank you for the support on our latest craft launch!",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryLink {
    Artisan(usize),
    Product(usize),
    Region(usize),
}

pub struct GalleryFixture {
    pub title: &'static str,
    pub image: &'static str,
    pub link: GalleryLink,
    pub featured: bool,
}

impl GalleryFixture {
    pub fn description(&self) -> String {
        format!("{} capturing the craft process.", self.title)
    }
}

pub const GALLERY: &[GalleryFixture] = &[
    GalleryFixture {
        title: "Loom in Motion",
        image: "gallery/loom.jpg",
        link: GalleryLink::Artisan(1),
        featured: true,
    },
    GalleryFixture {
        title: "Craft Atelier",
        image: "gallery/atelier.jpg",
        link: GalleryLink::Artisan(3),
        featured: false,
    },
    GalleryFixture {
        title: "Blue Pottery Detail",
        image: "gallery/loom.jpg",
        link: GalleryLink::Product(0),
        featured: true,
    },
    GalleryFixture {
        title: "Terracotta Textures",
        image: "gallery/atelier.jpg",
        link: GalleryLink::Product(2),
        featured: false,
    },
    GalleryFixture {
        title: "Desert Workshop",
        image: "gallery/loom.jpg",
        link: GalleryLink::Region(0),
        featured: false,
    },
];

pub struct OrderFixture {
    pub account: usize,
    pub status: OrderStatus,
    /// Whole rupees.
    pub total: i64,
    pub shipping_address: &'static str,
    /// (product index, quantity)
    pub items: &'static [(usize, i32)],
}

impl OrderFixture {
    pub fn total(&self) -> Decimal {
        rupees(self.total)
    }
}

pub const ORDERS: &[OrderFixture] = &[
    OrderFixture {
        account: 0,
        status: OrderStatus::Delivered,
        total: 4398,
        shipping_address: "Jaipur Heritage Street, 302001",
        items: &[(0, 1), (1, 1)],
    },
    OrderFixture {
        account: 1,
        status: OrderStatus::Processing,
        total: 2799,
        shipping_address: "Ahmedabad Craft Lane, 380001",
        items: &[(5, 1)],
    },
];

pub const ACTIVITY_PER_PRODUCT: usize = 3;

/// Placeholder image paths under the media root, with the label each one
/// is coloured by.
pub const IMAGES: &[(&str, &str)] = &[
    ("categories/textiles.jpg", "Textiles"),
    ("categories/pottery.jpg", "Pottery"),
    ("categories/jewelry.jpg", "Jewelry"),
    ("categories/paintings.jpg", "Paintings"),
    ("regions/rajasthan.jpg", "Rajasthan"),
    ("regions/gujarat.jpg", "Gujarat"),
    ("regions/west-bengal.jpg", "West Bengal"),
    ("regions/tamil-nadu.jpg", "Tamil Nadu"),
    ("artisans/meera-sharma.jpg", "Meera"),
    ("artisans/arjun-patel.jpg", "Arjun"),
    ("artisans/riya-sen.jpg", "Riya"),
    ("artisans/karthik-iyer.jpg", "Karthik"),
    ("products/blue-pottery-vase.jpg", "Blue Vase"),
    ("products/ajrakh-stole.jpg", "Ajrakh"),
    ("products/terracotta-lamp.jpg", "Lamp"),
    ("products/kalamkari-wall-art.jpg", "Kalamkari"),
    ("products/silver-jhumkas.jpg", "Jhumkas"),
    ("products/kantha-throw.jpg", "Kantha"),
    ("stories/heritage-textiles.jpg", "Heritage"),
    ("stories/craft-traditions.jpg", "Traditions"),
    ("gallery/loom.jpg", "Loom"),
    ("gallery/atelier.jpg", "Atelier"),
    ("shop_logos/sadbhav-crafts.jpg", "Sadbhav"),
    ("shop_logos/raaga-studio.jpg", "Raaga"),
    ("shop_logos/sundar-collective.jpg", "Sundar"),
    ("profiles/buyer1.jpg", "Buyer"),
    ("profiles/buyer2.jpg", "Buyer"),
];

pub fn rupees(amount: i64) -> Decimal {
    Decimal::new(amount * 100, 2)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::slug::slugify;

    fn assert_unique_slugs(names: impl Iterator<Item = &'static str>) {
        let mut seen = HashSet::new();
        for name in names {
            assert!(seen.insert(slugify(name)), "duplicate slug for {name}");
        }
    }

    #[test]
    fn slugs_are_unique_per_table() {
        assert_unique_slugs(REGIONS.iter().map(|r| r.name));
        assert_unique_slugs(CATEGORIES.iter().map(|c| c.name));
        assert_unique_slugs(ARTISANS.iter().map(|a| a.name));
        assert_unique_slugs(PRODUCTS.iter().map(|p| p.name));
        assert_unique_slugs(STORIES.iter().map(|s| s.title));
    }

    #[test]
    fn cross_references_are_in_bounds() {
        for artisan in ARTISANS {
            assert!(artisan.region < REGIONS.len());
        }
        for seller in SELLERS {
            assert_eq!(ACCOUNTS[seller.account].user_type, UserType::Seller);
            assert!(seller.region < REGIONS.len());
        }
        for product in PRODUCTS {
            assert!(product.category < CATEGORIES.len());
            assert!(product.region < REGIONS.len());
            assert!(product.artisan < ARTISANS.len());
            assert!(product.seller < SELLERS.len());
        }
        for story in STORIES {
            assert!(story.region < REGIONS.len());
        }
        for post in POSTS {
            assert!(post.account < ACCOUNTS.len());
            assert!(post.content.chars().count() <= 280);
        }
        for image in GALLERY {
            match image.link {
                GalleryLink::Artisan(i) => assert!(i < ARTISANS.len()),
                GalleryLink::Product(i) => assert!(i < PRODUCTS.len()),
                GalleryLink::Region(i) => assert!(i < REGIONS.len()),
            }
        }
        for order in ORDERS {
            assert_eq!(ACCOUNTS[order.account].user_type, UserType::Buyer);
            assert!(order.items.iter().all(|(p, _)| *p < PRODUCTS.len()));
        }
    }

    #[test]
    fn order_totals_match_their_items() {
        for order in ORDERS {
            let sum: Decimal = order
                .items
                .iter()
                .map(|(p, qty)| PRODUCTS[*p].price() * Decimal::from(*qty))
                .sum();
            assert_eq!(sum, order.total());
        }
        assert_eq!(ORDERS[0].total().to_string(), "4398.00");
        assert_eq!(ORDERS[1].total().to_string(), "2799.00");
    }

    #[test]
    fn every_referenced_image_has_a_placeholder() {
        let known: HashSet<&str> = IMAGES.iter().map(|(path, _)| *path).collect();
        let referenced = PRODUCTS
            .iter()
            .map(|p| p.image)
            .chain(SELLERS.iter().map(|s| s.logo))
            .chain(GALLERY.iter().map(|g| g.image))
            .chain(ACCOUNTS.iter().map(Account::profile_image))
            .chain([STORY_IMAGE]);
        for path in referenced {
            assert!(known.contains(path), "{path} has no placeholder");
        }
        for region in REGIONS {
            let path = format!("regions/{}.jpg", slugify(region.name));
            assert!(known.contains(path.as_str()));
        }
    }

    #[test]
    fn original_price_carries_the_markup() {
        assert_eq!(PRODUCTS[0].original_price().to_string(), "2899.00");
    }
}
