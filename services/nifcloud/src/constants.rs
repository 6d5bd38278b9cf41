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

use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

// Env values used in nifcloud services.
pub const NIFCLOUD_ACCESS_KEY_ID: &str = "NIFCLOUD_ACCESS_KEY_ID";
pub const NIFCLOUD_SECRET_ACCESS_KEY: &str = "NIFCLOUD_SECRET_ACCESS_KEY";

// Query fields injected before signing.
pub const ACCESS_KEY_ID: &str = "AccessKeyId";
pub const SECURITY_TOKEN: &str = "SecurityToken";
pub const SIGNATURE: &str = "Signature";
pub const SIGNATURE_METHOD: &str = "SignatureMethod";
pub const SIGNATURE_VERSION: &str = "SignatureVersion";
pub const TIMESTAMP: &str = "Timestamp";

// Literal values of the scheme.
pub const SIGNATURE_VERSION_2: &str = "2";
pub const HMAC_SHA256: &str = "HmacSHA256";

/// AsciiSet for the canonical query encoding of Signature Version 2.
///
/// - URI encode every byte except the unreserved characters: 'A'-'Z',
///   'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space is therefore `%20`, never `+`.
pub static NIFCLOUD_QUERY_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
