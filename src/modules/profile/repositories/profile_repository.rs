use chrono::Utc;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::profile::models::{BusinessProfile, BusinessProfileInput};

// The table holds at most one row, keyed by this fixed id.
const PROFILE_ID: &str = "default";

pub struct ProfileRepository {
    pool: MySqlPool,
}

impl ProfileRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<BusinessProfile>> {
        let profile = sqlx::query_as::<_, BusinessProfile>(
            r#"
            SELECT company_name, gst_number, pan_number, address, city, state, pincode,
                   phone, email, bank_name, account_number, ifsc_code, account_holder,
                   updated_at
            FROM business_profile
            WHERE id = ?
            "#,
        )
        .bind(PROFILE_ID)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(profile)
    }

    pub async fn upsert(&self, input: BusinessProfileInput) -> Result<BusinessProfile> {
        let updated_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO business_profile (
                id, company_name, gst_number, pan_number, address, city, state, pincode,
                phone, email, bank_name, account_number, ifsc_code, account_holder, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                company_name = VALUES(company_name),
                gst_number = VALUES(gst_number),
                pan_number = VALUES(pan_number),
                address = VALUES(address),
                city = VALUES(city),
                state = VALUES(state),
                pincode = VALUES(pincode),
                phone = VALUES(phone),
                email = VALUES(email),
                bank_name = VALUES(bank_name),
                account_number = VALUES(account_number),
                ifsc_code = VALUES(ifsc_code),
                account_holder = VALUES(account_holder),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(PROFILE_ID)
        .bind(&input.company_name)
        .bind(&input.gst_number)
        .bind(&input.pan_number)
        .bind(&input.address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.bank_name)
        .bind(&input.account_number)
        .bind(&input.ifsc_code)
        .bind(&input.account_holder)
        .bind(updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(BusinessProfile {
            company_name: input.company_name,
            gst_number: input.gst_number,
            pan_number: input.pan_number,
            address: input.address,
            city: input.city,
            state: input.state,
            pincode: input.pincode,
            phone: input.phone,
            email: input.email,
            bank_name: input.bank_name,
            account_number: input.account_number,
            ifsc_code: input.ifsc_code,
            account_holder: input.account_holder,
            updated_at: Some(updated_at),
        })
    }
}
