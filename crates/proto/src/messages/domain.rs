// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain management messages.

use super::{define_reply, define_request};

define_request! {
    /// Registers a workflow domain with the cluster.
    pub struct DomainRegisterRequest => DomainRegisterReply {
        str "Name" => name / set_name;
        str "Description" => description / set_description;
        str "OwnerEmail" => owner_email / set_owner_email;
        /// Workflow history retention in days.
        int "RetentionDays" => retention_days / set_retention_days;
    }
}

define_reply! {
    pub struct DomainRegisterReply {}
}

define_request! {
    /// Fetches the details of a registered domain.
    pub struct DomainDescribeRequest => DomainDescribeReply {
        str "Name" => name / set_name;
    }
}

define_reply! {
    pub struct DomainDescribeReply {
        str "DomainInfoName" => domain_info_name / set_domain_info_name;
        str "DomainInfoDescription" => domain_info_description / set_domain_info_description;
        str "DomainInfoStatus" => domain_info_status / set_domain_info_status;
        str "DomainInfoOwnerEmail" => domain_info_owner_email / set_domain_info_owner_email;
    }
}
