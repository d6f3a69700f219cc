//! Hardcoded document served when the content file is missing or unreadable.

use std::collections::BTreeMap;

use crate::model::{
    Address, BusinessContactData, BusinessHours, CLOSED, ContentSections, HeroBanner,
    LandingPageContent, Layout, Newsletter, PlantTip, Season, SeasonalPlant, SectionLayout,
    SocialLinks, SocialProof, Stat, Testimonial,
};

/// Section names in their default page order.
pub const DEFAULT_SECTION_ORDER: [&str; 6] = [
    "hero",
    "seasonal",
    "tips",
    "socialProof",
    "newsletter",
    "contact",
];

pub fn default_content() -> LandingPageContent {
    LandingPageContent {
        content: default_sections(),
        contact: default_contact(),
        layout: default_layout(),
        ..Default::default()
    }
}

fn default_sections() -> ContentSections {
    ContentSections {
        hero_banners: vec![
            HeroBanner {
                id: "hero-1".to_string(),
                image_url: "/images/hero/greenhouse.jpg".to_string(),
                alt_text: "Sunlit greenhouse full of potted plants".to_string(),
                headline: "Grow something beautiful".to_string(),
                subheadline: Some("Locally grown plants and expert advice".to_string()),
                cta_text: Some("Visit us".to_string()),
                cta_link: Some("#contact".to_string()),
                is_active: true,
                display_order: 1,
            },
            HeroBanner {
                id: "hero-2".to_string(),
                image_url: "/images/hero/seedlings.jpg".to_string(),
                alt_text: "Rows of seedlings in trays".to_string(),
                headline: "Fresh seasonal stock every week".to_string(),
                subheadline: None,
                cta_text: Some("See what's in season".to_string()),
                cta_link: Some("#seasonal".to_string()),
                is_active: true,
                display_order: 2,
            },
        ],
        seasonal_plants: vec![
            SeasonalPlant {
                id: "plant-1".to_string(),
                name: "Tulips".to_string(),
                description: "Bold spring color for beds and containers.".to_string(),
                image_url: Some("/images/plants/tulips.jpg".to_string()),
                season: Season::Spring,
                care_level: Some("Easy".to_string()),
                is_active: true,
                display_order: 1,
            },
            SeasonalPlant {
                id: "plant-2".to_string(),
                name: "Snake Plant".to_string(),
                description: "A forgiving houseplant that thrives on neglect.".to_string(),
                image_url: Some("/images/plants/snake-plant.jpg".to_string()),
                season: Season::YearRound,
                care_level: Some("Easy".to_string()),
                is_active: true,
                display_order: 2,
            },
        ],
        plant_tips: vec![
            PlantTip {
                id: "tip-1".to_string(),
                title: "Water deeply, not often".to_string(),
                content: "Soak the soil thoroughly and let the top inch dry before watering again."
                    .to_string(),
                category: Some("Watering".to_string()),
                season: None,
                is_active: true,
                display_order: 1,
            },
            PlantTip {
                id: "tip-2".to_string(),
                title: "Mulch before the heat".to_string(),
                content: "A few inches of mulch keeps roots cool and holds moisture.".to_string(),
                category: Some("Soil".to_string()),
                season: Some(Season::Summer),
                is_active: true,
                display_order: 2,
            },
        ],
        social_proof: SocialProof {
            headline: "Loved by local gardeners".to_string(),
            subheadline: Some("Family owned and growing since 1998".to_string()),
            stats: vec![
                Stat {
                    label: "Plant varieties".to_string(),
                    value: "500+".to_string(),
                },
                Stat {
                    label: "Happy customers".to_string(),
                    value: "10,000+".to_string(),
                },
            ],
            testimonials: vec![Testimonial {
                id: "testimonial-1".to_string(),
                author: "Maria G.".to_string(),
                quote: "The staff helped me bring my fiddle leaf fig back to life.".to_string(),
                rating: Some(5),
                location: None,
                is_active: true,
                display_order: 1,
            }],
        },
        newsletter: Newsletter {
            enabled: true,
            title: "Stay in the loop".to_string(),
            description: "Seasonal arrivals and care tips, once a month.".to_string(),
            button_text: "Subscribe".to_string(),
        },
    }
}

fn default_contact() -> BusinessContactData {
    let weekday = "9:00 AM - 6:00 PM".to_string();
    BusinessContactData {
        business_name: "Garden Center".to_string(),
        phone: "(555) 010-0100".to_string(),
        email: "hello@example.com".to_string(),
        address: Address {
            street: "123 Garden Way".to_string(),
            city: "Springfield".to_string(),
            state: "OR".to_string(),
            zip: "97477".to_string(),
            country: None,
        },
        hours: BusinessHours {
            monday: weekday.clone(),
            tuesday: weekday.clone(),
            wednesday: weekday.clone(),
            thursday: weekday.clone(),
            friday: weekday,
            saturday: "9:00 AM - 5:00 PM".to_string(),
            sunday: CLOSED.to_string(),
        },
        coordinates: None,
        directions_url: None,
        social_links: SocialLinks::default(),
    }
}

fn default_layout() -> Layout {
    let sections: BTreeMap<String, SectionLayout> = DEFAULT_SECTION_ORDER
        .iter()
        .zip(1..)
        .map(|(name, order)| {
            (
                (*name).to_string(),
                SectionLayout {
                    enabled: true,
                    order,
                },
            )
        })
        .collect();
    Layout {
        sections,
        container_width: "lg".to_string(),
    }
}
