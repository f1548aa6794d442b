// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use winazure_core::hash::{base64_decode, base64_encode};
use winazure_core::utils::Redact;
use winazure_core::{Error, Result, SigningCredential};

/// Shared Key credential of a storage account.
///
/// The account key is decoded once at construction and never changes
/// afterwards; clones share the decoded bytes.
#[derive(Clone)]
pub struct Credential {
    account_name: String,
    account_key: Arc<[u8]>,
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let encoded = base64_encode(&self.account_key);
        f.debug_struct("Credential")
            .field("account_name", &Redact::from(&self.account_name))
            .field("account_key", &Redact::from(&encoded))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.account_name.is_empty() && !self.account_key.is_empty()
    }
}

impl Credential {
    /// Create a credential from an account name and its base64 encoded key.
    pub fn with_shared_key(account_name: &str, account_key: &str) -> Result<Self> {
        if account_name.is_empty() {
            return Err(Error::credential_invalid("account name must not be empty"));
        }

        let key = base64_decode(account_key).map_err(|e| {
            Error::credential_invalid("account key is not valid base64")
                .with_source(e)
                .with_context(format!("account_name: {account_name}"))
        })?;
        if key.is_empty() {
            return Err(Error::credential_invalid("account key must not be empty")
                .with_context(format!("account_name: {account_name}")));
        }

        Ok(Self {
            account_name: account_name.to_string(),
            account_key: key.into(),
        })
    }

    /// Account name the key belongs to.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Decoded account key.
    pub fn account_key(&self) -> &[u8] {
        &self.account_key
    }
}
