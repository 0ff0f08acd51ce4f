//! Institution endpoint registry.
//!
//! Every ENT deployment of the remote service is addressed by an
//! [`Endpoint`]: the base URL of its mobile gateway plus the mobile
//! application version string the gateway expects. The known production
//! deployments are enumerated in [`Institution`]; self-hosted or future
//! deployments can be described with [`Endpoint::new`].

use url::Url;

use crate::error::KdecoleError;

/// Mobile application version currently advertised by every production
/// deployment.
const CURRENT_API_VERSION: &str = "3.7.14";

/// A deployment of the remote service: (api version, base URL) pair.
///
/// The pair is resolved once by the caller, at configuration time, and
/// passed into client construction; the client never consults the registry
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    api_version: String,
    base_url: String,
}

impl Endpoint {
    /// Creates an endpoint for a custom deployment.
    ///
    /// The base URL is trimmed of trailing slashes and must parse as an
    /// absolute `http`/`https` URL.
    ///
    /// # Errors
    ///
    /// Returns `KdecoleError::Config` if the URL is malformed or uses
    /// another scheme.
    pub fn new(
        api_version: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, KdecoleError> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| KdecoleError::config(format!("invalid base URL: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(KdecoleError::config(
                "base URL must start with http:// or https://",
            ));
        }

        Ok(Self {
            api_version: api_version.into(),
            base_url,
        })
    }

    /// The mobile application version sent in the version header.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// The base URL of the mobile gateway, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// The known production ENT deployments.
///
/// Static configuration data: each variant resolves to the (version, URL)
/// pair of one deployment via [`Institution::endpoint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Institution {
    /// Mon Bureau Numérique (Grand Est).
    MonBureauNumerique,
    /// Mon ENT Occitanie.
    MonEntOccitanie,
    /// Arsène 76 (Seine-Maritime).
    Arsene76,
    /// ENT27 (Eure).
    Ent27,
    /// ENT Creuse.
    EntCreuse,
    /// ENT Auvergne-Rhône-Alpes.
    AuvergneRhoneAlpes,
    /// Agora 06 (Alpes-Maritimes).
    Agora06,
    /// Cybercollèges 42 (Loire).
    CyberColleges42,
    /// eCollège 31 (Haute-Garonne).
    EcollegeHauteGaronne,
    /// MonCollège (Val d'Oise).
    MonCollegeValdoise,
    /// Webcollège (Seine-Saint-Denis).
    WebcollegeSeineSaintDenis,
    /// ECLAT-BFC (Bourgogne-Franche-Comté).
    EclatBfc,
    /// @ucollège 84 (Vaucluse).
    AuCollege84Vaucluse,
    /// Kosmos Éducation.
    KosmosEducation,
    /// Skolengo demonstration platform.
    DemoSkolengo,
    /// Skolengo training platform.
    SkolengoFormation,
    /// Schulportal Ostbelgien (East Belgium).
    SchulportalOstbelgien,
    /// ENT Val-de-Marne.
    EntValDeMarne,
}

impl Institution {
    /// All known deployments, in registry order.
    pub const ALL: [Institution; 18] = [
        Institution::MonBureauNumerique,
        Institution::MonEntOccitanie,
        Institution::Arsene76,
        Institution::Ent27,
        Institution::EntCreuse,
        Institution::AuvergneRhoneAlpes,
        Institution::Agora06,
        Institution::CyberColleges42,
        Institution::EcollegeHauteGaronne,
        Institution::MonCollegeValdoise,
        Institution::WebcollegeSeineSaintDenis,
        Institution::EclatBfc,
        Institution::AuCollege84Vaucluse,
        Institution::KosmosEducation,
        Institution::DemoSkolengo,
        Institution::SkolengoFormation,
        Institution::SchulportalOstbelgien,
        Institution::EntValDeMarne,
    ];

    /// Base URL of this deployment's mobile gateway.
    pub const fn base_url(self) -> &'static str {
        match self {
            Institution::MonBureauNumerique => "https://mobilite.monbureaunumerique.fr/mobilite",
            Institution::MonEntOccitanie => "https://mobilite.mon-ent-occitanie.fr/mobilite",
            Institution::Arsene76 => "https://mobilite.arsene76.fr/mobilite",
            Institution::Ent27 => "https://mobilite.ent27.fr/mobilite",
            Institution::EntCreuse => "https://mobilite.entcreuse.fr/mobilite",
            Institution::AuvergneRhoneAlpes => {
                "https://mobilite.ent.auvergnerhonealpes.fr/mobilite"
            }
            Institution::Agora06 => "https://mobilite.agora06.fr/mobilite",
            Institution::CyberColleges42 => "https://mobilite.cybercolleges42.fr/mobilite",
            Institution::EcollegeHauteGaronne => {
                "https://mobilite.ecollege.haute-garonne.fr/mobilite"
            }
            Institution::MonCollegeValdoise => {
                "https://mobilite.moncollege.valdoise.fr/mobilite"
            }
            Institution::WebcollegeSeineSaintDenis => {
                "https://mobilite.webcollege.seinesaintdenis.fr/mobilite"
            }
            Institution::EclatBfc => "https://mobilite.eclat-bfc.fr/mobilite",
            Institution::AuCollege84Vaucluse => {
                "https://mobilite.aucollege84.vaucluse.fr/mobilite"
            }
            Institution::KosmosEducation => "https://mobilite.kosmoseducation.com/mobilite",
            Institution::DemoSkolengo => "https://mobilite.demo.skolengo.com/mobilite",
            Institution::SkolengoFormation => {
                "https://mobilite.formation.skolengo.com/mobilite"
            }
            Institution::SchulportalOstbelgien => "https://mobilite.schulen.be/mobilite",
            Institution::EntValDeMarne => {
                "https://mobilite.entvaldemarne.skolengo.com/mobilite"
            }
        }
    }

    /// Resolves this deployment to its endpoint pair.
    pub fn endpoint(self) -> Endpoint {
        Endpoint {
            api_version: CURRENT_API_VERSION.to_string(),
            base_url: self.base_url().to_string(),
        }
    }
}
