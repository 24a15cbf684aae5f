use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::modules::content::domain::entities::{
    AboutContent, ContactContent, EducationItem, Experience, HeroContent, HeroStat, Project,
    ServiceIcon, ServiceItem, SkillCategory, SkillColorScheme, SocialLink, SocialPlatform,
};

pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, n, 10, 0, 0).unwrap()
}

pub fn project(id: &str, title: &str, created: DateTime<Utc>) -> Project {
    Project {
        id: id.to_string(),
        title: title.to_string(),
        description: format!("{} in short", title),
        long_description: format!("{} at length", title),
        image: Some(format!(
            "https://xyz.supabase.co/storage/v1/object/public/portfolio-images/projects/{}.png",
            id
        )),
        tags: vec!["Rust".to_string(), "Actix".to_string()],
        demo_link: None,
        code_link: Some(format!("https://github.com/example/{}", id)),
        created_at: created,
        updated_at: created + Duration::hours(1),
    }
}

pub fn category(id: &str, name: &str) -> SkillCategory {
    SkillCategory {
        id: id.to_string(),
        name: name.to_string(),
        color_scheme: SkillColorScheme::Emerald,
        skills: vec!["Rust".to_string(), "SQL".to_string()],
    }
}

pub fn hero() -> HeroContent {
    HeroContent {
        name: "Etsub Taye".to_string(),
        badge: "Available for work".to_string(),
        roles: vec!["Full-stack developer".to_string(), "Designer".to_string()],
        description: "I build things for the web.".to_string(),
        stats: vec![HeroStat {
            value: "5+".to_string(),
            label: "Years".to_string(),
        }],
        profile_image: Some(
            "https://xyz.supabase.co/storage/v1/object/public/portfolio-images/profile/me.png"
                .to_string(),
        ),
        resume_url: None,
    }
}

pub fn about() -> AboutContent {
    AboutContent {
        paragraphs: vec!["First paragraph".to_string()],
        experiences: vec![Experience {
            id: "exp-1".to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            period: "2022 - Present".to_string(),
            description: "Shipping".to_string(),
            is_current: true,
            image: None,
        }],
        education: vec![EducationItem {
            id: "edu-1".to_string(),
            degree: "BSc".to_string(),
            institution: "AAU".to_string(),
            period: "2016 - 2020".to_string(),
            description: "Computer science".to_string(),
            image: None,
        }],
    }
}

pub fn contact_with_socials(count: usize) -> ContactContent {
    ContactContent {
        email: "me@example.com".to_string(),
        phone: "+251 900 000 000".to_string(),
        location: "Addis Ababa".to_string(),
        socials: (0..count)
            .map(|i| SocialLink {
                id: format!("soc-{}", i),
                name: format!("Link {}", i),
                url: format!("https://example.com/{}", i),
                platform: SocialPlatform::Github,
            })
            .collect(),
    }
}

pub fn services() -> Vec<ServiceItem> {
    vec![ServiceItem {
        id: "svc-1".to_string(),
        icon: ServiceIcon::Server,
        title: "Backend Development".to_string(),
        description: "APIs and data".to_string(),
    }]
}
