// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The aggregation and budget evaluation engine. Everything in here is a
//! pure function over in-memory collections: callers load rows, the engine
//! computes, callers persist or render the result.

pub mod aggregate;
pub mod budget;
pub mod report;
pub mod stats;
