//! Hospital branding

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOSPITAL_NAME: &str = "City General Hospital";
pub const DEFAULT_ADDRESS: &str = "12 Hospital Road, Main Street";
pub const DEFAULT_PHONE: &str = "+91 00000 00000";
pub const DEFAULT_EMAIL: &str = "info@citygeneral.example";
pub const DEFAULT_TAGLINE: &str = "Thank you for choosing us. Get well soon!";

/// Branding overrides; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HospitalBranding {
    pub name: Option<String>,
    pub subtitle: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub accreditation: Option<String>,
    pub tagline: Option<String>,
}

/// Branding with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBranding {
    pub name: String,
    pub subtitle: Option<String>,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub accreditation: Option<String>,
    pub tagline: String,
}

/// Treat blank strings as absent
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl HospitalBranding {
    pub fn resolve(&self) -> ResolvedBranding {
        ResolvedBranding {
            name: present(&self.name).unwrap_or_else(|| DEFAULT_HOSPITAL_NAME.to_string()),
            subtitle: present(&self.subtitle),
            address: present(&self.address).unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            phone: present(&self.phone).unwrap_or_else(|| DEFAULT_PHONE.to_string()),
            email: present(&self.email).unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            accreditation: present(&self.accreditation),
            tagline: present(&self.tagline).unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
        }
    }
}

impl Default for ResolvedBranding {
    fn default() -> Self {
        HospitalBranding::default().resolve()
    }
}

impl ResolvedBranding {
    /// "Phone: .. | Email: .." contact line
    pub fn contact_line(&self) -> String {
        format!("Phone: {} | Email: {}", self.phone, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let branding = HospitalBranding::default().resolve();
        assert_eq!(branding.name, DEFAULT_HOSPITAL_NAME);
        assert_eq!(branding.address, DEFAULT_ADDRESS);
        assert_eq!(branding.phone, DEFAULT_PHONE);
        assert!(branding.subtitle.is_none());
    }

    #[test]
    fn test_overrides_and_blank_fields() {
        let branding: HospitalBranding =
            serde_json::from_str(r#"{"name":"Sunrise Clinic","phone":"  ","accreditation":"NABH"}"#)
                .unwrap();
        let resolved = branding.resolve();
        assert_eq!(resolved.name, "Sunrise Clinic");
        assert_eq!(resolved.phone, DEFAULT_PHONE);
        assert_eq!(resolved.accreditation.as_deref(), Some("NABH"));
    }
}
