// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Unit conversion for alternate counter values.

use tracing::warn;

/// Scale a textual sample value by `multiplier`, keeping its numeric type.
///
/// A value written with a decimal point is scaled as a float and printed
/// with six fractional digits. Any other value is scaled as an integer.
/// Values that do not parse, or whose product overflows, are returned
/// unchanged.
pub fn scale_value(value: &str, multiplier: i64) -> String {
    if multiplier == 1 {
        return value.to_string();
    }

    if value.contains('.') {
        return match value.parse::<f64>() {
            Ok(v) => format!("{:.6}", v * multiplier as f64),
            Err(e) => {
                warn!("Can not scale value {value:?} as a float: {e}");
                value.to_string()
            }
        };
    }

    match value.parse::<i64>() {
        Ok(v) => match v.checked_mul(multiplier) {
            Some(scaled) => scaled.to_string(),
            None => {
                warn!("Scaling {value} by {multiplier} overflows, keeping the raw value");
                value.to_string()
            }
        },
        Err(e) => {
            warn!("Can not scale value {value:?} as an integer: {e}");
            value.to_string()
        }
    }
}
