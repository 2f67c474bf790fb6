use crate::vault::certificates::CertificateVersion;

/// Pick the enabled version with the most recent update time.
///
/// Single pass with a running best. A record only displaces the current best
/// when its timestamp is strictly after it, so the first-seen record wins on
/// exact ties. Disabled records are never eligible. Returns `None` when the
/// list has no enabled entry at all.
pub fn select_latest_enabled<I>(versions: I) -> Option<CertificateVersion>
where
    I: IntoIterator<Item = CertificateVersion>,
{
    let mut best: Option<CertificateVersion> = None;

    for version in versions {
        if !version.enabled {
            continue;
        }
        match &best {
            Some(current) if version.updated <= current.updated => {}
            _ => best = Some(version),
        }
    }

    best
}
