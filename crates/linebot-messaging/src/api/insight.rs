//! Delivery and follower statistics.

use crate::client::{Base, Client};
use crate::error::LineError;
use crate::models::{FollowersInsight, FriendDemographicsInsight, MessageDeliveryInsight};
use crate::Result;
use reqwest::Method;

/// Dates are `yyyyMMdd` in UTC+9.
fn check_date(date: &str) -> Result<()> {
    if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LineError::invalid_request(format!(
            "date must be yyyyMMdd, got '{}'",
            date
        )))
    }
}

impl Client {
    /// Number of messages sent from the channel on `date`.
    pub async fn get_number_messages_delivery(&self, date: &str) -> Result<MessageDeliveryInsight> {
        check_date(date)?;
        let request = self
            .request(Method::GET, Base::Api, "/v2/bot/insight/message/delivery")
            .query(&[("date", date)]);
        self.call(request).await
    }

    /// Friend counts on `date`.
    pub async fn get_number_followers(&self, date: &str) -> Result<FollowersInsight> {
        check_date(date)?;
        let request = self
            .request(Method::GET, Base::Api, "/v2/bot/insight/followers")
            .query(&[("date", date)]);
        self.call(request).await
    }

    pub async fn get_friend_demographics(&self) -> Result<FriendDemographicsInsight> {
        self.call(self.request(Method::GET, Base::Api, "/v2/bot/insight/demographic"))
            .await
    }
}
