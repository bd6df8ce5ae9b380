//! Static maritime demo records for the services portal.
//!
//! Seeded into the `maritime_*` document collections by `nara seed-maritime`.

use chrono::{DateTime, Duration, Utc};

use crate::entities::{
    Alert, GeoPoint, Localized, MaritimeService, Port, PortWeather, Vessel,
};

pub const VESSELS_COLLECTION: &str = "maritime_vessels";
pub const PORTS_COLLECTION: &str = "maritime_ports";
pub const SERVICES_COLLECTION: &str = "maritime_services";
pub const ALERTS_COLLECTION: &str = "maritime_alerts";

/// The full demo data set, stamped with `now`.
#[derive(Debug, Clone)]
pub struct MaritimeDataset {
    pub vessels: Vec<Vessel>,
    pub ports: Vec<Port>,
    pub services: Vec<MaritimeService>,
    pub alerts: Vec<Alert>,
}

impl MaritimeDataset {
    /// Total number of records across all collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vessels.len() + self.ports.len() + self.services.len() + self.alerts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[must_use]
pub fn maritime_dataset(now: DateTime<Utc>) -> MaritimeDataset {
    MaritimeDataset {
        vessels: vessels(now),
        ports: ports(now),
        services: services(now),
        alerts: alerts(now),
    }
}

#[allow(clippy::too_many_arguments)]
fn vessel(
    id: &str,
    name: Localized,
    vessel_type: &str,
    status: &str,
    speed: f64,
    heading: u16,
    position: (f64, f64),
    crew: u32,
    mission: Localized,
    now: DateTime<Utc>,
) -> Vessel {
    Vessel {
        id: id.to_string(),
        name,
        vessel_type: vessel_type.to_string(),
        status: status.to_string(),
        speed,
        heading,
        position: GeoPoint {
            lat: position.0,
            lon: position.1,
        },
        crew,
        mission,
        last_update: now,
    }
}

fn vessels(now: DateTime<Utc>) -> Vec<Vessel> {
    vec![
        vessel(
            "NARA-001",
            Localized::new("RV Ocean Explorer", "සාගර ගවේෂකයා", "கடல் ஆராய்ச்சி கப்பல்"),
            "research_vessel",
            "active",
            12.5,
            45,
            (6.9271, 79.8612),
            24,
            Localized::new("Deep Sea Survey", "ගැඹුරු මුහුදු සමීක්ෂණය", "ஆழ் கடல் ஆய்வு"),
            now,
        ),
        vessel(
            "FISH-245",
            Localized::new("MV Blue Horizon", "නිල් ක්ෂිතිජය", "நீல அடிவானம்"),
            "fishing_vessel",
            "in_port",
            0.0,
            180,
            (7.2906, 79.8428),
            12,
            Localized::new("Maintenance", "නඩත්තුව", "பராமரிப்பு"),
            now,
        ),
        vessel(
            "CARGO-789",
            Localized::new("MV Sri Lanka Pride", "ශ්‍රී ලංකා ආඩම්බරය", "இலங்கை பெருமை"),
            "cargo",
            "active",
            8.2,
            270,
            (6.9419, 79.8433),
            35,
            Localized::new("Export Transit", "අපනයන ප්‍රවාහනය", "ஏற்றுமதி போக்குவரத்து"),
            now,
        ),
        vessel(
            "RESEARCH-456",
            Localized::new("RV Marine Discovery", "සාගර සොයා ගැනීම", "கடல் கண்டுபிடிப்பு"),
            "research_vessel",
            "active",
            10.0,
            90,
            (6.0329, 80.2168),
            18,
            Localized::new("Coral Reef Study", "කොරල් පර අධ්‍යයනය", "பவளப்பாறை ஆய்வு"),
            now,
        ),
        vessel(
            "PATROL-123",
            Localized::new(
                "Coast Guard Vigilant",
                "වෙරළ ආරක්ෂක අවදානම",
                "கடற்கரை காவல் விழிப்பு",
            ),
            "patrol",
            "active",
            15.0,
            180,
            (7.8731, 80.7718),
            20,
            Localized::new(
                "Maritime Security Patrol",
                "සමුද්‍ර ආරක්ෂණ මුර සංචාරය",
                "கடல்சார் பாதுகாப்பு ரோந்து",
            ),
            now,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn port(
    code: &str,
    name: Localized,
    vessels: u32,
    capacity: u32,
    weather: (&str, i32, u32, u32),
    location: (f64, f64),
    facilities: &[&str],
    now: DateTime<Utc>,
) -> Port {
    Port {
        id: code.to_string(),
        name,
        code: code.to_string(),
        vessels,
        capacity,
        weather: PortWeather {
            condition: weather.0.to_string(),
            temp: weather.1,
            wind: weather.2,
            humidity: weather.3,
        },
        status: "operational".to_string(),
        location: GeoPoint {
            lat: location.0,
            lon: location.1,
        },
        facilities: facilities.iter().map(ToString::to_string).collect(),
        last_update: now,
    }
}

fn ports(now: DateTime<Utc>) -> Vec<Port> {
    vec![
        port(
            "LKCMB",
            Localized::new("Colombo Port", "කොළඹ වරාය", "கொழும்பு துறைமுகம்"),
            47,
            85,
            ("clear", 28, 12, 75),
            (6.9271, 79.8612),
            &["Container Terminal", "Bulk Terminal", "Oil Terminal"],
            now,
        ),
        port(
            "LKHAM",
            Localized::new("Hambantota Port", "හම්බන්තොට වරාය", "ஹம்பாந்தோட்டை துறைமுகம்"),
            12,
            45,
            ("cloudy", 29, 15, 70),
            (6.1241, 81.1185),
            &["Container Terminal", "Bunkering", "Ship Repair"],
            now,
        ),
        port(
            "LKGAL",
            Localized::new("Galle Port", "ගාල්ල වරාය", "காலி துறைமுகம்"),
            8,
            62,
            ("light_rain", 27, 18, 85),
            (6.0329, 80.2168),
            &["Fishing Harbor", "Passenger Terminal"],
            now,
        ),
        port(
            "LKTRI",
            Localized::new("Trincomalee Port", "ත්‍රිකුණාමලය වරාය", "திருகோணமலை துறைமுகம்"),
            15,
            55,
            ("clear", 30, 10, 68),
            (8.5874, 81.2152),
            &["Deep Water Harbor", "Oil Terminal", "Naval Base"],
            now,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn service(
    id: &str,
    title: Localized,
    description: Localized,
    category: &str,
    price: u32,
    duration: &str,
    requirements: &[&str],
    icon: &str,
    now: DateTime<Utc>,
) -> MaritimeService {
    MaritimeService {
        id: id.to_string(),
        title,
        description,
        category: category.to_string(),
        price,
        duration: duration.to_string(),
        requirements: requirements.iter().map(ToString::to_string).collect(),
        icon: icon.to_string(),
        status: "active".to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn services(now: DateTime<Utc>) -> Vec<MaritimeService> {
    vec![
        service(
            "service-001",
            Localized::new(
                "Vessel Safety Inspection",
                "යාත්‍රා ආරක්ෂණ පරීක්ෂණය",
                "கப்பல் பாதுகாப்பு ஆய்வு",
            ),
            Localized::new(
                "Comprehensive safety inspection for all vessel types including hull integrity, navigation equipment, and emergency systems",
                "බඳ අඛණ්ඩතාව, යාත්‍රා උපකරණ සහ හදිසි පද්ධති ඇතුළු සියලුම යාත්‍රා වර්ග සඳහා සම්පූර්ණ ආරක්ෂණ පරීක්ෂණය",
                "கப்பல் ஒருமைப்பாடு, வழிசெலுத்தல் உபகரணங்கள் மற்றும் அவசர அமைப்புகள் உட்பட அனைத்து கப்பல் வகைகளுக்கும் விரிவான பாதுகாப்பு ஆய்வு",
            ),
            "inspection",
            15000,
            "2-3 hours",
            &[
                "Valid vessel registration",
                "Insurance certificate",
                "Previous inspection records",
            ],
            "ClipboardCheck",
            now,
        ),
        service(
            "service-002",
            Localized::new(
                "Commercial Fishing License",
                "වාණිජ මසුන් ඇල්ලීමේ බලපත්‍රය",
                "வணிக மீன்பிடி உரிமம்",
            ),
            Localized::new(
                "Apply for or renew commercial fishing licenses for Sri Lankan waters with designated fishing zones",
                "නිර්දේශිත මසුන් ඇල්ලීමේ කලාප සහිත ශ්‍රී ලංකා ජලය සඳහා වාණිජ මසුන් ඇල්ලීමේ බලපත්‍ර සඳහා අයදුම් කරන්න හෝ අලුත් කරන්න",
                "நியமிக்கப்பட்ட மீன்பிடி மண்டலங்களுடன் இலங்கை நீர்நிலைகளுக்கான வணிக மீன்பிடி உரிமங்களை விண்ணப்பிக்கவும் அல்லது புதுப்பிக்கவும்",
            ),
            "permit",
            5000,
            "5-7 business days",
            &[
                "Vessel ownership proof",
                "Crew list",
                "Fishing equipment inventory",
            ],
            "FileCheck",
            now,
        ),
        service(
            "service-005",
            Localized::new(
                "Marine Emergency Response",
                "සමුද්‍ර හදිසි ප්‍රතිචාරය",
                "கடல் அவசர பதில்",
            ),
            Localized::new(
                "24/7 emergency response service for maritime incidents including search and rescue operations",
                "සෙවීම් සහ ගලවා ගැනීමේ මෙහෙයුම් ඇතුළු සමුද්‍ර සිදුවීම් සඳහා 24/7 හදිසි ප්‍රතිචාර සේවාව",
                "தேடல் மற்றும் மீட்பு நடவடிக்கைகள் உட்பட கடல்சார் சம்பவங்களுக்கான 24/7 அவசர பதில் சேவை",
            ),
            "emergency",
            0,
            "Immediate",
            &["Emergency call to 1915"],
            "AlertCircle",
            now,
        ),
    ]
}

fn alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: "alert-001".to_string(),
            severity: "high".to_string(),
            alert_type: "weather".to_string(),
            title: Localized::new(
                "Strong Wind Warning - South Coast",
                "තද සුළං අනතුරු ඇඟවීම - දකුණු වෙරළ",
                "கடும் காற்று எச்சரிக்கை - தென் கடற்கரை",
            ),
            description: Localized::new(
                "Strong winds of 40-50 km/h expected in southern coastal areas. Small fishing vessels advised to return to port.",
                "දකුණු වෙරළ ප්‍රදේශවල පැයට කිලෝමීටර 40-50 ක තද සුළං අපේක්ෂා කෙරේ. කුඩා මසුන් ඇල්ලීමේ යාත්‍රා වරායට ආපසු යාමට උපදෙස් දෙනු ලැබේ.",
                "தென் கடற்கரை பகுதிகளில் மணிக்கு 40-50 கி.மீ வேகத்தில் கடும் காற்று எதிர்பார்க்கப்படுகிறது. சிறிய மீன்பிடி கப்பல்கள் துறைமுகத்திற்கு திரும்ப அறிவுறுத்தப்படுகின்றன.",
            ),
            affected_areas: vec!["Galle".into(), "Matara".into(), "Hambantota".into()],
            valid_from: now,
            valid_until: now + Duration::hours(24),
            status: "active".to_string(),
            created_at: now,
        },
        Alert {
            id: "alert-002".to_string(),
            severity: "medium".to_string(),
            alert_type: "navigation".to_string(),
            title: Localized::new(
                "Navigation Buoy Maintenance - Colombo Harbor",
                "යාත්‍රා බෝයි නඩත්තුව - කොළඹ වරාය",
                "வழிசெலுத்தல் மிதவை பராமரிப்பு - கொழும்பு துறைமுகம்",
            ),
            description: Localized::new(
                "Navigation buoys near Colombo harbor entrance will be under maintenance. Vessels should exercise caution.",
                "කොළඹ වරාය ප්‍රවේශය අසල යාත්‍රා බෝයි නඩත්තුවක් යටතේ පවතී. යාත්‍රා ප්‍රවේශම් විය යුතුය.",
                "கொழும்பு துறைமுக நுழைவாயில் அருகே வழிசெலுத்தல் மிதவைகள் பராமரிப்பில் இருக்கும். கப்பல்கள் எச்சரிக்கையுடன் இருக்க வேண்டும்.",
            ),
            affected_areas: vec!["Colombo".into()],
            valid_from: now,
            valid_until: now + Duration::hours(48),
            status: "active".to_string(),
            created_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_counts() {
        let data = maritime_dataset(Utc::now());
        assert_eq!(data.vessels.len(), 5);
        assert_eq!(data.ports.len(), 4);
        assert_eq!(data.services.len(), 3);
        assert_eq!(data.alerts.len(), 2);
        assert_eq!(data.len(), 14);
    }

    #[test]
    fn ids_are_unique_per_collection() {
        let data = maritime_dataset(Utc::now());
        let mut ids: Vec<&str> = data.vessels.iter().map(|v| v.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), data.vessels.len());
    }

    #[test]
    fn alerts_expire_after_they_start() {
        let now = Utc::now();
        for alert in maritime_dataset(now).alerts {
            assert!(alert.valid_until > alert.valid_from);
        }
    }

    #[test]
    fn vessel_serializes_type_key() {
        let data = maritime_dataset(Utc::now());
        let json = serde_json::to_value(&data.vessels[0]).unwrap();
        assert_eq!(json["type"], "research_vessel");
        assert!(json.get("lastUpdate").is_some());
        assert_eq!(json["name"]["en"], "RV Ocean Explorer");
    }
}
