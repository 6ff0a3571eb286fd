// ABOUTME: Backend endpoint path templates for every resource family
// ABOUTME: Templates use :key placeholders resolved by ApiConfig::build_url
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Dispatch Admin Contributors

/// Admin authentication and admin account management
pub mod admin {
    /// `POST` register a new admin
    pub const REGISTER: &str = "/auth/admin/register";
    /// `POST` login
    pub const LOGIN: &str = "/auth/admin/login";
    /// `POST` logout
    pub const LOGOUT: &str = "/auth/admin/logout";
    /// `POST` exchange a refresh token for a new pair
    pub const REFRESH_TOKEN: &str = "/auth/admin/refresh-token";
    /// `GET`/`PUT` current admin profile
    pub const PROFILE: &str = "/auth/admin/profile";
    /// `PUT` change password
    pub const CHANGE_PASSWORD: &str = "/auth/admin/change-password";
    /// `GET` list admins
    pub const ALL: &str = "/auth/admin/all";
    /// `PUT`/`DELETE` one admin
    pub const BY_ID: &str = "/auth/admin/:id";
}

/// Drivers, exposed under the rider collection and the generic user collection
pub mod drivers {
    /// `GET` rider collection list
    pub const RIDER_LIST: &str = "/riders/all/riders";
    /// `GET` generic user list (filtered with `role=rider`)
    pub const USER_LIST: &str = "/dev/all";
    /// `GET`/`DELETE` rider by id
    pub const RIDER_BY_ID: &str = "/riders/:id";
    /// `GET`/`PUT`/`DELETE` user by id
    pub const USER_BY_ID: &str = "/dev/:id";
    /// `POST` create driver
    pub const CREATE: &str = "/add";
    /// `PATCH` block via rider collection
    pub const RIDER_BLOCK: &str = "/riders/:id/block";
    /// `PATCH` unblock via rider collection
    pub const RIDER_UNBLOCK: &str = "/riders/:id/unblock";
    /// `PATCH` block via user collection
    pub const USER_BLOCK: &str = "/dev/:id/block";
    /// `PATCH` unblock via user collection
    pub const USER_UNBLOCK: &str = "/dev/:id/unblock";
    /// `PATCH` approve one document via rider collection
    pub const RIDER_DOCUMENT_APPROVE: &str = "/riders/:id/documents/:docType/approve";
    /// `PATCH` reject one document via rider collection
    pub const RIDER_DOCUMENT_REJECT: &str = "/riders/:id/documents/:docType/reject";
    /// `PATCH` approve one document via user collection
    pub const USER_DOCUMENT_APPROVE: &str = "/dev/:id/documents/:docType/approve";
    /// `PATCH` reject one document via user collection
    pub const USER_DOCUMENT_REJECT: &str = "/dev/:id/documents/:docType/reject";
    /// `PUT` multipart document upload keyed by phone
    pub const UPLOAD_DOCUMENTS: &str = "/riders/update/rider";
}

/// Conventional REST endpoints shared by bookings, coupons and tickets
#[derive(Debug, Clone, Copy)]
pub struct ResourceEndpoints {
    /// `GET` list
    pub list: &'static str,
    /// `GET`/`PUT`/`DELETE` by id
    pub by_id: &'static str,
    /// `POST` create
    pub create: &'static str,
    /// `GET` aggregate stats
    pub stats: &'static str,
}

/// Bookings
pub mod bookings {
    use super::ResourceEndpoints;

    /// CRUD endpoints
    pub const CRUD: ResourceEndpoints = ResourceEndpoints {
        list: "/bookings/all",
        by_id: "/bookings/:id",
        create: "/bookings/create",
        stats: "/bookings/stats",
    };
    /// `PATCH` booking status
    pub const STATUS: &str = "/bookings/:id/status";
    /// `PATCH` assign a driver
    pub const ASSIGN_DRIVER: &str = "/bookings/:id/assign";
    /// `PATCH` cancel a booking
    pub const CANCEL: &str = "/bookings/:id/cancel";
}

/// Coupons
pub mod coupons {
    use super::ResourceEndpoints;

    /// CRUD endpoints
    pub const CRUD: ResourceEndpoints = ResourceEndpoints {
        list: "/coupons/all",
        by_id: "/coupons/:id",
        create: "/coupons/create",
        stats: "/coupons/stats",
    };
    /// `POST` apply a coupon code to an order amount
    pub const APPLY: &str = "/coupons/apply";
    /// `PATCH` flip active/inactive
    pub const TOGGLE_STATUS: &str = "/coupons/:id/toggle-status";
}

/// Support tickets
pub mod tickets {
    use super::ResourceEndpoints;

    /// CRUD endpoints
    pub const CRUD: ResourceEndpoints = ResourceEndpoints {
        list: "/tickets/all",
        by_id: "/tickets/:id",
        create: "/tickets/create",
        stats: "/tickets/stats",
    };
    /// `POST` add a comment
    pub const COMMENTS: &str = "/tickets/:id/comments";
    /// `PATCH` ticket status
    pub const STATUS: &str = "/tickets/:id/status";
    /// `PATCH` assign to an admin
    pub const ASSIGN: &str = "/tickets/:id/assign";
}
