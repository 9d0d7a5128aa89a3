//! Get-or-create by natural key.
//!
//! The platform has no upsert for store-scoped singletons, so these helpers
//! query by name or type first and only create when nothing matches.

use tracing::debug;
use vivero_commerce::prelude::*;

use crate::error::PlatformError;
use crate::input::*;
use crate::platform::{CommercePlatform, PlatformOp};

/// A record that was either found or created.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensured<T> {
    pub value: T,
    /// True when the record did not exist before.
    pub created: bool,
}

impl<T> Ensured<T> {
    fn found(value: T) -> Self {
        Self {
            value,
            created: false,
        }
    }

    fn created(value: T) -> Self {
        Self {
            value,
            created: true,
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// Return the first sales channel named `name`, creating it if absent.
pub async fn ensure_sales_channel<P: CommercePlatform + ?Sized>(
    platform: &P,
    name: &str,
) -> Result<Ensured<SalesChannel>, PlatformError> {
    let existing = platform
        .list_sales_channels(&SalesChannelFilter::by_name(name))
        .await?;
    if let Some(channel) = existing.into_iter().next() {
        debug!(channel = %channel.id, name, "reusing sales channel");
        return Ok(Ensured::found(channel));
    }

    let created = platform
        .create_sales_channels(vec![CreateSalesChannel {
            name: name.to_string(),
            description: None,
        }])
        .await?;
    let channel = created.into_iter().next().ok_or(PlatformError::EmptyResult {
        op: PlatformOp::CreateSalesChannels,
    })?;
    debug!(channel = %channel.id, name, "created sales channel");
    Ok(Ensured::created(channel))
}

/// Return the first shipping profile of `profile_type`, creating one named `name` if absent.
pub async fn ensure_shipping_profile<P: CommercePlatform + ?Sized>(
    platform: &P,
    name: &str,
    profile_type: &str,
) -> Result<Ensured<ShippingProfile>, PlatformError> {
    let existing = platform
        .list_shipping_profiles(&ShippingProfileFilter::by_type(profile_type))
        .await?;
    if let Some(profile) = existing.into_iter().next() {
        debug!(profile = %profile.id, profile_type, "reusing shipping profile");
        return Ok(Ensured::found(profile));
    }

    let created = platform
        .create_shipping_profiles(vec![CreateShippingProfile {
            name: name.to_string(),
            profile_type: profile_type.to_string(),
        }])
        .await?;
    let profile = created.into_iter().next().ok_or(PlatformError::EmptyResult {
        op: PlatformOp::CreateShippingProfiles,
    })?;
    debug!(profile = %profile.id, profile_type, "created shipping profile");
    Ok(Ensured::created(profile))
}
