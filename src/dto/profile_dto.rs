use crate::models::profile::StudentProfile;

/// Working copy of a fetched profile. Field edits are merged into the local
/// copy and the whole object is PUT back; native input typing aside, there
/// is no field-level validation.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    profile: StudentProfile,
}

impl ProfileForm {
    pub fn from_profile(profile: StudentProfile) -> Self {
        Self { profile }
    }

    pub fn set(&mut self, field: &str, value: &str) -> Result<(), String> {
        let value = (!value.is_empty()).then(|| value.to_string());
        match field {
            "phone" => self.profile.phone = value,
            "college" => self.profile.college = value,
            "graduationYear" => self.profile.graduation_year = value,
            "education" => self.profile.education = value,
            "bio" => self.profile.bio = value,
            "skills" => self.profile.skills = value,
            other => return Err(format!("unknown profile field: {}", other)),
        }
        Ok(())
    }

    pub fn as_profile(&self) -> &StudentProfile {
        &self.profile
    }

    pub fn into_profile(self) -> StudentProfile {
        self.profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edits_merge_into_fetched_profile() {
        let fetched = StudentProfile {
            user_id: Some(7),
            phone: Some("123".into()),
            college: Some("MIT WPU".into()),
            ..Default::default()
        };
        let mut form = ProfileForm::from_profile(fetched);
        form.set("bio", "Rustacean").unwrap();
        form.set("phone", "456").unwrap();

        let profile = form.into_profile();
        assert_eq!(profile.user_id, Some(7));
        assert_eq!(profile.college.as_deref(), Some("MIT WPU"));
        assert_eq!(profile.phone.as_deref(), Some("456"));
        assert_eq!(profile.bio.as_deref(), Some("Rustacean"));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut form = ProfileForm::default();
        assert!(form.set("resumeUrl", "x").is_err());
    }
}
