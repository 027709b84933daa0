//! Seeded site content.
//!
//! Used to create the document on first start and to fill in sections that
//! a stored document is missing.

use serde_json::{json, Value};

use super::document::{Fields, Record, Stat, User, Visibility};

/// Username of the seeded administrator.
pub const ADMIN_USERNAME: &str = "admin";

/// Password the seeded administrator starts with unless configured otherwise.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Email of the seeded administrator.
pub const ADMIN_EMAIL: &str = "admin@punarjani.com";

/// Elements of the site header with visibility toggles.
pub const HEADER_ELEMENTS: [&str; 3] = ["menuIcon", "logo", "contactBtn"];

/// Elements of the site footer with visibility toggles.
pub const FOOTER_ELEMENTS: [&str; 6] = [
    "logo",
    "contactCol",
    "navCol1",
    "navCol2",
    "largeText",
    "scrollTop",
];

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

fn record(id: u64, value: Value) -> Record {
    Record::new(id, fields(value))
}

pub fn admin_user(password_hash: String) -> User {
    User {
        id: 1,
        username: ADMIN_USERNAME.to_string(),
        password_hash,
        email: ADMIN_EMAIL.to_string(),
    }
}

pub fn hero() -> Fields {
    fields(json!({
        "heading": "Empower your healing and harmony",
        "description": "Join us in transforming your body and mind through our comprehensive yoga and fitness programs.",
        "ctaPrimary": "Book now",
        "ctaSecondary": "Get your Direction",
        "heroImage": "assets/images/hero-bg-2b24fd.png"
    }))
}

pub fn stats() -> Vec<Stat> {
    vec![
        Stat::new("1k", "+", "Patients treated"),
        Stat::new("95", "%", "Feel real pain relief"),
        Stat::new("3", "+", "Expert therapies available"),
    ]
}

pub fn stats_description() -> String {
    "Whether you're dealing with chronic pain, recovering from an injury, or simply looking to \
     move more comfortably, our treatments are designed to relieve pain, restore mobility, and \
     support your long\u{2011}term wellness."
        .to_string()
}

pub fn services() -> Vec<Record> {
    vec![
        record(1, json!({
            "title": "Electro Acupuncture",
            "description": "Targeted sessions using fine needles and gentle electrical stimulation to reduce pain, calm inflammation, and support faster recovery.",
            "icon": "assets/images/service-bg-1.svg"
        })),
        record(2, json!({
            "title": "Cupping Therapy",
            "description": "Personalized training programs tailored to your fitness goals. Focus on strength and flexibility.",
            "icon": "assets/images/service-bg-2.svg"
        })),
        record(3, json!({
            "title": "Manual Therapy",
            "description": "Explore workshops on mindfulness, stress relief, and holistic wellness. Suitable for all levels of experience.",
            "icon": "assets/images/service-bg-3.svg"
        })),
    ]
}

pub fn doctors() -> Vec<Record> {
    vec![record(1, json!({
        "name": "Alicia Regis",
        "image": "assets/images/doctor-profile.png",
        "specialization": "Specialist Consultation",
        "description": "One-on-one sessions with our fitness and yoga experts. Get personalized guidance and encouragement to reach your specific goals."
    }))]
}

pub fn reviews() -> Vec<Record> {
    const THANKS: &str = "My brother I can't thank you enough even if you say it's all me.";
    const GYM: &str = "I started going to the gym but had no idea what I was doing.";

    [
        (1, "Clare Bamford", THANKS),
        (2, "Jamie Kokot", GYM),
        (3, "Clare Bamford", THANKS),
        (4, "Clare Bamford", GYM),
        (5, "Clare Bamford", THANKS),
    ]
    .into_iter()
    .map(|(id, name, text)| {
        record(id, json!({
            "name": name,
            "username": "@staking",
            "avatar": format!("assets/images/review-{}-56586a.png", id),
            "text": text,
            "date": "22.03.2021"
        }))
    })
    .collect()
}

pub fn faqs() -> Vec<Record> {
    [
        (
            "What types of yoga classes do you offer?",
            "We offer various yoga styles including Hatha, Vinyasa, Yin, and Restorative yoga.",
        ),
        (
            "Do I need any prior experience to join your fitness programs?",
            "No prior experience is needed. Our programs are designed for all fitness levels.",
        ),
        (
            "How do I book a personalized coaching session?",
            "You can book a session through our website or by calling our reception.",
        ),
        (
            "What should I bring to a yoga class?",
            "Bring comfortable clothing, a water bottle, and your own mat if you prefer.",
        ),
        (
            "Are your nutritional plans tailored to individual needs?",
            "Yes, all our nutritional plans are customized based on your goals and dietary requirements.",
        ),
        (
            "How often are wellness workshops held?",
            "Wellness workshops are held monthly. Check our events calendar for upcoming dates.",
        ),
    ]
    .into_iter()
    .zip(1..)
    .map(|((question, answer), id)| record(id, json!({ "question": question, "answer": answer })))
    .collect()
}

pub fn contact() -> Fields {
    fields(json!({
        "phone": "(814) 413-9191",
        "email": "hello@harmoni.com"
    }))
}

pub fn services_page() -> Fields {
    fields(json!({
        "heroTitle": "Our Services",
        "heroDescription": "We offer a wide range of evidence-based therapies to help you recover, heal and thrive.",
        "conditionsTitle": "Conditions We Treat",
        "conditionsDescription": "From chronic pain to post-injury recovery, our expert team provides targeted treatments for a wide range of musculoskeletal and neurological conditions.",
        "whyChooseTitle": "Why Choose Us",
        "whyChooseDescription": "Our multidisciplinary approach combines traditional wisdom with modern techniques to deliver lasting results for every patient."
    }))
}

pub fn contact_page() -> Fields {
    fields(json!({
        "title": "Contact Us",
        "subtitle": "we're here to help! Whether you have questions, feedback, or need support, our team is ready to assist you.",
        "address": "123 Wellness Street, Thrissur, Kerala",
        "mapEmbedUrl": "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d3926.7!2d76.2!3d10.5"
    }))
}

pub fn site_settings() -> Fields {
    fields(json!({
        "clinicName": "Punarjani",
        "footerTagline": "Wellness & Healthcare"
    }))
}

pub fn header_visibility() -> Visibility {
    Visibility::all_visible(HEADER_ELEMENTS)
}

pub fn footer_visibility() -> Visibility {
    Visibility::all_visible(FOOTER_ELEMENTS)
}
